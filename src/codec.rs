//! Length-prefixed codec for TCP framing
//!
//! All messages on both channels are framed as:
//! ```text
//! [ 4 bytes: length (u32, big-endian) ][ N bytes: UTF-8 payload ]
//! ```
//!
//! This ensures message boundaries are preserved over TCP streams.

use bytes::{BufMut, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum frame size. Commands and replies are short text lines; a
/// larger header is a corrupt or hostile peer.
pub const MAX_FRAME_SIZE: u32 = 64 * 1024;

/// Errors that can occur while framing messages. All of these are fatal
/// to the session.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Frame too large: {0} bytes (max: {MAX_FRAME_SIZE})")]
    FrameTooLarge(usize),

    #[error("Invalid frame length prefix: {0}")]
    InvalidLength(u32),

    #[error("Frame payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Channel I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a payload into a length-prefixed frame.
pub fn encode(text: &str) -> Result<BytesMut, CodecError> {
    let payload = text.as_bytes();
    if payload.len() > MAX_FRAME_SIZE as usize {
        return Err(CodecError::FrameTooLarge(payload.len()));
    }

    let mut buf = BytesMut::with_capacity(4 + payload.len());
    buf.put_u32(payload.len() as u32);
    buf.put_slice(payload);
    Ok(buf)
}

/// Send one framed message on the channel.
pub async fn send<W>(channel: &mut W, text: &str) -> Result<(), CodecError>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode(text)?;
    channel.write_all(&frame).await?;
    channel.flush().await?;
    Ok(())
}

/// Receive one framed message from the channel.
///
/// Blocks until the full frame has arrived. Fails if the peer closes
/// before `4 + length` bytes arrive, if the header declares an oversized
/// frame, or if the payload is not valid UTF-8.
pub async fn receive<R>(channel: &mut R) -> Result<String, CodecError>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; 4];
    channel.read_exact(&mut header).await?;

    let length = u32::from_be_bytes(header);
    if length > MAX_FRAME_SIZE {
        return Err(CodecError::InvalidLength(length));
    }

    let mut payload = vec![0u8; length as usize];
    channel.read_exact(&mut payload).await?;

    Ok(String::from_utf8(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_send_receive_roundtrip() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        send(&mut client, "motor_run A 200").await.expect("send failed");
        let received = receive(&mut server).await.expect("receive failed");
        assert_eq!(received, "motor_run A 200");
    }

    #[tokio::test]
    async fn test_roundtrip_empty_and_spaces() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        for text in ["", "   ", "buttons_pressed UP DOWN", "héllo wörld"] {
            send(&mut client, text).await.expect("send failed");
            let received = receive(&mut server).await.expect("receive failed");
            assert_eq!(received, text);
        }
    }

    #[test]
    fn test_header_is_big_endian_length() {
        let frame = encode("exit").expect("encode failed");
        assert_eq!(&frame[..4], &[0, 0, 0, 4]);
        assert_eq!(&frame[4..], b"exit");
    }

    #[tokio::test]
    async fn test_premature_close_in_header() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        client.write_all(&[0, 0]).await.unwrap();
        drop(client);

        let result = receive(&mut server).await;
        assert!(matches!(result, Err(CodecError::Io(_))));
    }

    #[tokio::test]
    async fn test_premature_close_in_payload() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        // Header declares 10 bytes, only 3 arrive
        client.write_all(&[0, 0, 0, 10]).await.unwrap();
        client.write_all(b"abc").await.unwrap();
        drop(client);

        let result = receive(&mut server).await;
        assert!(matches!(result, Err(CodecError::Io(_))));
    }

    #[tokio::test]
    async fn test_oversized_length_rejected() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        client
            .write_all(&(MAX_FRAME_SIZE + 1).to_be_bytes())
            .await
            .unwrap();

        let result = receive(&mut server).await;
        assert!(matches!(result, Err(CodecError::InvalidLength(_))));
    }

    #[tokio::test]
    async fn test_invalid_utf8_rejected() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        client.write_all(&[0, 0, 0, 2]).await.unwrap();
        client.write_all(&[0xff, 0xfe]).await.unwrap();

        let result = receive(&mut server).await;
        assert!(matches!(result, Err(CodecError::InvalidUtf8(_))));
    }
}
