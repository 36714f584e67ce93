use broadside::protocol::MAX_FRAME_SIZE;
use broadside::{Event, InMemoryTransport, Role, SessionNode, TcpTransport, Transport};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

#[tokio::test]
async fn test_in_memory_pair_delivers_in_order() {
    let (mut a, mut b) = InMemoryTransport::pair();

    a.send(Event::BothPlayersReady).await.unwrap();
    a.send(Event::LeaveSession {
        session: "room".into(),
    })
    .await
    .unwrap();

    assert_eq!(b.recv().await.unwrap(), Event::BothPlayersReady);
    assert_eq!(
        b.recv().await.unwrap(),
        Event::LeaveSession {
            session: "room".into()
        }
    );

    // The pair is bidirectional.
    b.send(Event::BothPlayersReady).await.unwrap();
    assert_eq!(a.recv().await.unwrap(), Event::BothPlayersReady);
}

#[tokio::test]
async fn test_tcp_recv_rejects_oversized_frame_header() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let client = tokio::spawn(async move {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        // A header claiming one byte more than the frame budget, no payload.
        stream
            .write_all(&(MAX_FRAME_SIZE + 1).to_be_bytes())
            .await
            .unwrap();
        stream
    });

    let (stream, _) = listener.accept().await.unwrap();
    let mut transport = TcpTransport::new(stream);
    assert!(transport.recv().await.is_err());
    drop(client.await.unwrap());
}

#[tokio::test]
async fn test_join_handshake_over_in_memory_pair() {
    let (a, mut b) = InMemoryTransport::pair();

    // Stand in for the relay on the far endpoint.
    let relay_side = tokio::spawn(async move {
        match b.recv().await.unwrap() {
            Event::JoinSession {
                session,
                player_name,
            } => {
                assert_eq!(session, "room");
                assert_eq!(player_name, "alice");
            }
            other => panic!("expected JoinSession, got {:?}", other),
        }
        b.send(Event::AssignRole {
            role: Role::Player2,
        })
        .await
        .unwrap();
        b
    });

    let node = SessionNode::join(Box::new(a), "room".into(), "alice".into())
        .await
        .unwrap();
    assert_eq!(node.role(), Role::Player2);
    relay_side.await.unwrap();
}
