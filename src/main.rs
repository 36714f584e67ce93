use std::io::{self, Write};

use clap::Parser;
use tokio::net::TcpListener;
use tokio::time::Duration;

use broadside::ui::{self, parse_placement_args};
use broadside::{init_logging, Match, Mode, Phase, Relay, Role, SessionNode, TcpTransport};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Play a local game against the built-in opponent.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 400, help = "Opponent thinking delay in milliseconds")]
        delay_ms: u64,
    },
    /// Run a relay server that pairs peers into sessions.
    Relay {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
    },
    /// Join a relayed session as a networked player.
    Join {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long)]
        session: String,
        #[arg(long)]
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { seed, delay_ms } => {
            let game = match seed {
                Some(s) => Match::with_seed(Mode::LocalAi, s),
                None => Match::new(Mode::LocalAi),
            };
            run_local(game, Duration::from_millis(delay_ms)).await
        }
        Commands::Relay { bind } => {
            let listener = TcpListener::bind(&bind).await?;
            Relay::new().serve(listener).await
        }
        Commands::Join {
            connect,
            session,
            name,
        } => {
            let transport = TcpTransport::connect(&connect).await?;
            let node = SessionNode::join(Box::new(transport), session, name).await?;
            run_networked(node).await
        }
    }
}

fn prompt(text: &str) -> String {
    print!("{}", text);
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

fn show_alert(game: &Match) {
    if let Some(alert) = game.state().alert {
        println!("! {}", alert);
    }
}

async fn run_local(mut game: Match, delay: Duration) -> anyhow::Result<()> {
    'game: loop {
        println!("Place your fleet. Orientation: h = horizontal, v = vertical.");
        while let Some(name) = game.state().player1.fleet.next_unplaced() {
            ui::print_board(&game.state().player1, true);
            let line = prompt(&format!(
                "Place {} (length {}) at coordinate and orientation (e.g. A1 h): ",
                name,
                name.length()
            ));
            match parse_placement_args(&line) {
                Some((origin, orientation)) => {
                    game.place(Role::Player1, name, origin, orientation);
                    show_alert(&game);
                }
                None => println!("! Could not parse, expected something like B4 v"),
            }
        }
        game.start_battle();
        show_alert(&game);

        while game.state().phase == Phase::Battle {
            println!("\nYour fleet:");
            ui::print_board(&game.state().player1, true);
            println!("Enemy waters:");
            ui::print_board(&game.state().player2, false);

            let line = prompt("Fire at (e.g. C7), or 'reset' / 'quit': ");
            match line.as_str() {
                "quit" => return Ok(()),
                "reset" => {
                    game.reset();
                    continue 'game;
                }
                _ => {}
            }
            let Some(target) = ui::parse_coord(&line) else {
                println!("! Could not parse coordinate");
                continue;
            };
            game.attack(Role::Player1, target);
            show_alert(&game);

            // The opponent replies after a short thinking delay. `ai_step`
            // re-checks the current state when the timer fires, so a step
            // raced against a reset is a no-op rather than a stale move.
            while game.ai_turn_pending() {
                tokio::time::sleep(delay).await;
                let before = game.state().player2.shots().len();
                game.ai_step();
                if game.state().player2.shots().len() == before {
                    break;
                }
                if let Some(&shot) = game.state().player2.shots().last() {
                    println!("Opponent fires at {}", ui::coord_to_string(shot));
                }
            }
        }

        if let Some(winner) = game.state().winner {
            match winner {
                Role::Player1 => println!("\nYou won!"),
                _ => println!("\nThe opponent won."),
            }
        }
        return Ok(());
    }
}

async fn run_networked(mut node: SessionNode) -> anyhow::Result<()> {
    let me = node.role();
    if me == Role::Spectator {
        println!("Session is full, watching as spectator.");
        loop {
            node.pump().await?;
            if node.game().state().phase == Phase::Finished {
                break;
            }
        }
        return Ok(());
    }

    println!("Joined as {}. Place your fleet.", me);
    while let Some(name) = node
        .game()
        .state()
        .player(me)
        .and_then(|p| p.fleet.next_unplaced())
    {
        let line = prompt(&format!(
            "Place {} (length {}) at coordinate and orientation (e.g. A1 h): ",
            name,
            name.length()
        ));
        match parse_placement_args(&line) {
            Some((origin, orientation)) => {
                node.place(name, origin, orientation).await?;
                if let Some(alert) = node.game().state().alert {
                    println!("! {}", alert);
                }
            }
            None => println!("! Could not parse, expected something like B4 v"),
        }
    }

    node.ready().await?;
    println!("Waiting for the opponent to get ready...");
    while !node.battle_started() {
        node.pump().await?;
    }
    println!("Battle begins!");

    loop {
        let state = node.game().state();
        if state.phase == Phase::Finished {
            break;
        }
        if state.current_player == me {
            println!("\nEnemy waters:");
            if let Some(opponent) = me.opponent().and_then(|o| state.player(o)) {
                ui::print_board(opponent, false);
            }
            let line = prompt("Fire at (e.g. C7): ");
            let Some(target) = ui::parse_coord(&line) else {
                println!("! Could not parse coordinate");
                continue;
            };
            node.attack(target).await?;
            if let Some(alert) = node.game().state().alert {
                println!("! {}", alert);
            }
        } else {
            println!("Waiting for the opponent's move...");
            node.pump().await?;
        }
    }

    if let Some(winner) = node.game().state().winner {
        if winner == me {
            println!("\nYou won!");
        } else {
            println!("\nThe opponent won.");
        }
    }
    node.leave().await?;
    Ok(())
}
