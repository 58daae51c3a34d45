use std::{io, thread, time::Duration};

use wsmsg::{
    channel, ClientHandshake, Close, Message, Ping, Pong, ProtocolViolation, RenderOptions,
    TransportError, ViolationKind,
};

// Pretends to be the writer and reader of one connection: every outbound
// message is "sent" and the peer's answer is posted back inbound.
fn fake_worker(mut outbound: channel::Receiver, inbound: channel::Sender) -> anyhow::Result<()> {
    while let Some(message) = outbound.blocking_recv() {
        let reply = match message {
            Message::ClientHandshake(_) => Message::ServerHandshake,
            Message::Text(t) if t.payload() == "break" => {
                ProtocolViolation::from_kind(ViolationKind::ReservedBits).into()
            }
            Message::Text(t) => Message::Text(t),
            Message::Binary(b) => Message::Binary(b),
            Message::Ping(p) => match p.into_payload() {
                Some(payload) => Pong::with_payload(payload)?.into(),
                None => Pong::new().into(),
            },
            Message::Pong(_) => continue,
            Message::Close(c) => Message::Close(c),
            other => {
                inbound.blocking_send(
                    TransportError::from(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("writer got {}", other.kind()),
                    ))
                    .into(),
                )?;
                continue;
            }
        };
        let done = reply.is_terminal();
        inbound.blocking_send(reply)?;
        if done {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (tx, out_rx) = channel::outbound(32);
    let (in_tx, mut rx) = channel::inbound(32);

    let worker = thread::spawn(move || fake_worker(out_rx, in_tx));

    tx.send(ClientHandshake::with_path("example.com", "/chat", None)?.into())
        .await?;
    tx.send(Message::text("hello")).await?;
    tx.send(Message::binary(vec![0u8; 512])).await?;
    tx.send(Ping::with_payload(b"heartbeat".to_vec())?.into())
        .await?;
    tx.send(Message::text("x".repeat(200))).await?;
    tx.send(Close::with_reason(1000, "bye")?.into()).await?;

    let short = RenderOptions::new(16);
    while let Some(message) = rx.recv().await {
        match &message {
            Message::ServerHandshake => println!("connected"),
            Message::Text(_) | Message::Binary(_) => println!("received {}", message.render(short)),
            Message::Ping(_) | Message::Pong(_) => println!("heartbeat {}", message),
            Message::Close(c) => println!("closed with {}", c.code()),
            Message::ProtocolViolation(v) => println!("violation {}: {}", v.code(), v.reason()),
            Message::Error(e) => println!("transport failure: {}", e),
            Message::ClientHandshake(_) => unreachable!(),
        }
        if message.is_terminal() {
            break;
        }
    }

    worker
        .join()
        .map_err(|_| anyhow::anyhow!("worker panicked"))??;
    Ok(())
}
