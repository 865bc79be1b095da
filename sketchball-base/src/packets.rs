pub const PACKET_STATUS_REQUEST: u16 = 0;
pub const PACKET_STATUS_RESPONSE: u16 = 1;
pub const PACKET_START_REQUEST: u16 = 2;
pub const PACKET_START_RESPONSE: u16 = 3;
pub const PACKET_ADVANCE_REQUEST: u16 = 4;
pub const PACKET_ADVANCE_RESPONSE: u16 = 5;
pub const PACKET_RESET_REQUEST: u16 = 6;
pub const PACKET_RESET_RESPONSE: u16 = 7;
pub const PACKET_STREAM_REQUEST: u16 = 8;
pub const PACKET_STREAM_RESPONSE: u16 = 9;
pub const PACKET_FRAME: u16 = 99;

// Phases travel as `GamePhase::id()` values, levels are 1-based.

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketStatusRequest {}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketStatusResponse {
    pub phase: u32,
    pub level: u32,
    pub total_levels: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketStartRequest {}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketStartResponse {
    pub success: u32,
    pub phase: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketAdvanceRequest {}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketAdvanceResponse {
    pub success: u32,
    pub level: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketResetRequest {}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketResetResponse {
    pub success: u32,
    pub phase: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketStreamRequest {}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketStreamResponse {
    pub tick: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PacketFrameHeader {
    pub timestamp: u64,
    pub width: u32,
    pub height: u32,
}
