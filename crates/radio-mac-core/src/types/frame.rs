//! Read-only view of a frame buffer owned by the core.
//!
//! Hooks receive the PSDU as `&[u8]` with the PHR length byte first. The core
//! keeps ownership; a hook only borrows it for the duration of one call.

/// Offset of the PHR length byte.
const PHR_OFFSET: usize = 0;
/// Offset of the first frame control byte.
const FCF_OFFSET: usize = 1;
/// Bit in the first frame control byte requesting an acknowledgement.
const ACK_REQUEST_BIT: u8 = 0x20;
/// The PHR length field only uses the low seven bits.
const PHR_LENGTH_MASK: u8 = 0x7f;

/// Borrowed accessor over a raw frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRef<'a> {
    bytes: &'a [u8],
}

impl<'a> FrameRef<'a> {
    /// Wraps a raw frame buffer.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// PSDU length taken from the PHR, or `None` for an empty buffer.
    pub fn psdu_length(&self) -> Option<u8> {
        self.bytes.get(PHR_OFFSET).map(|phr| phr & PHR_LENGTH_MASK)
    }

    /// Whether the frame control field requests an acknowledgement.
    pub fn ack_requested(&self) -> bool {
        self.bytes
            .get(FCF_OFFSET)
            .is_some_and(|fcf| fcf & ACK_REQUEST_BIT != 0)
    }
}

impl<'a> From<&'a [u8]> for FrameRef<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}
