pub mod arp;
pub mod channel;

pub const ETH_HDR_LEN: usize = 14;
pub const ARP_LEN: usize = 28;
/// Shortest ethernet frame we send, padded to the wire minimum (no FCS).
pub const MIN_ETH_FRAME_NO_FCS: usize = 60;
