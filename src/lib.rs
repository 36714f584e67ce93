mod ai;
mod game;
pub mod grid;
mod logging;
pub mod node;
pub mod protocol;
pub mod relay;
mod ship;
mod state;
pub mod transport;
pub mod ui;

pub use ai::{ai_attack, choose_target, random_fleet};
pub use game::{Match, Mode};
pub use grid::{
    index_to_row_col, orthogonal_neighbors, row_col_to_index, Cell, CellIndex, CellSet,
    BOARD_SIZE, NUM_CELLS,
};
pub use logging::init_logging;
pub use node::SessionNode;
pub use protocol::Event;
pub use relay::Relay;
pub use ship::{footprint, Fleet, Orientation, Ship, ShipName, NUM_SHIPS};
pub use state::{Alert, MatchState, Phase, PlayerState, Role};
pub use transport::in_memory::InMemoryTransport;
pub use transport::tcp::TcpTransport;
pub use transport::Transport;
