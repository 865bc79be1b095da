use anyhow::bail;
use anyhow::Result;
use std::mem;
use std::ptr;
use std::slice;

pub mod from;
pub mod into;

const PING_CID: u8 = 0x00;
const PONG_CID: u8 = 0x01;
const OBJECT_CID: u8 = 0x02;
const ARRAY_CID: u8 = 0x03;

/// Wire unit exchanged over one WebSocket binary message. Objects and arrays
/// carry raw `#[repr(C)]` payloads tagged with a packet id, so definitions in
/// `packets.rs` must stay padding-free.
#[derive(Clone, Debug)]
pub enum Packet {
    Ping { timestamp: u64 },
    Pong { timestamp: u64 },
    Object { oid: u16, data: Vec<u8> },
    Array { aid: u16, length: u32, data: Vec<u8> },
    Unknown,
}

impl Packet {
    pub fn from_object<T>(oid: u16, object: &T) -> Self
    where
        T: Copy,
    {
        Packet::Object { oid, data: raw_bytes(object).to_vec() }
    }

    pub fn from_array<T>(aid: u16, array: &[T]) -> Self
    where
        T: Copy,
    {
        let mut data = Vec::with_capacity(mem::size_of_val(array));
        for item in array {
            data.extend_from_slice(raw_bytes(item));
        }

        Packet::Array { aid, length: array.len() as u32, data }
    }

    pub fn from_array_with_header<H, T>(aid: u16, header: &H, array: &[T]) -> Self
    where
        H: Copy,
        T: Copy,
    {
        let mut data = Vec::with_capacity(mem::size_of::<H>() + mem::size_of_val(array));
        data.extend_from_slice(raw_bytes(header));
        for item in array {
            data.extend_from_slice(raw_bytes(item));
        }

        Packet::Array { aid, length: array.len() as u32, data }
    }

    pub fn to_object<T>(&self) -> Result<T>
    where
        T: Copy,
    {
        match self {
            Packet::Object { data, .. } => read_raw(data),
            _ => bail!("Packet is not an object"),
        }
    }

    pub fn to_array_with_header<H, T>(&self) -> Result<(H, Vec<T>)>
    where
        H: Copy,
        T: Copy,
    {
        match self {
            Packet::Array { length, data, .. } => {
                let expected = mem::size_of::<H>() + *length as usize * mem::size_of::<T>();
                if data.len() != expected {
                    bail!("Invalid array payload size ({} instead of {})", data.len(), expected);
                }

                let header = read_raw::<H>(&data[..mem::size_of::<H>()])?;
                let mut items = Vec::with_capacity(*length as usize);

                for chunk in data[mem::size_of::<H>()..].chunks_exact(mem::size_of::<T>()) {
                    items.push(read_raw::<T>(chunk)?);
                }

                Ok((header, items))
            }
            _ => bail!("Packet is not an array"),
        }
    }

    pub fn get_id(&self) -> Option<u16> {
        match self {
            Packet::Object { oid, .. } => Some(*oid),
            Packet::Array { aid, .. } => Some(*aid),
            _ => None,
        }
    }
}

fn raw_bytes<T>(object: &T) -> &[u8]
where
    T: Copy,
{
    unsafe { slice::from_raw_parts(object as *const T as *const u8, mem::size_of::<T>()) }
}

fn read_raw<T>(data: &[u8]) -> Result<T>
where
    T: Copy,
{
    if data.len() != mem::size_of::<T>() {
        bail!("Invalid payload size ({} instead of {})", data.len(), mem::size_of::<T>());
    }

    Ok(unsafe { ptr::read_unaligned(data.as_ptr() as *const T) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::*;

    #[test]
    fn object_survives_the_wire() {
        let packet = Packet::from_object(PACKET_STATUS_RESPONSE, &PacketStatusResponse { phase: 1, level: 2, total_levels: 3 });
        let bytes: Vec<u8> = packet.into();
        let packet: Packet = bytes.into();

        assert_eq!(packet.get_id(), Some(PACKET_STATUS_RESPONSE));

        let status = packet.to_object::<PacketStatusResponse>().unwrap();
        assert_eq!(status.phase, 1);
        assert_eq!(status.level, 2);
        assert_eq!(status.total_levels, 3);
    }

    #[test]
    fn array_with_header_survives_the_wire() {
        let header = PacketFrameHeader { timestamp: 123, width: 4, height: 2 };
        let payload = [0xde, 0xad, 0xbe, 0xef];

        let packet = Packet::from_array_with_header(PACKET_FRAME, &header, &payload);
        let bytes: Vec<u8> = packet.into();
        let packet: Packet = bytes.into();

        assert_eq!(packet.get_id(), Some(PACKET_FRAME));

        let (header, data) = packet.to_array_with_header::<PacketFrameHeader, u8>().unwrap();
        assert_eq!(header.timestamp, 123);
        assert_eq!(header.width, 4);
        assert_eq!(header.height, 2);
        assert_eq!(data, payload);
    }

    #[test]
    fn garbage_parses_as_unknown() {
        let packet: Packet = vec![0xff, 0x00, 0x01].into();
        assert!(matches!(packet, Packet::Unknown));
        assert!(packet.get_id().is_none());

        let packet: Packet = Vec::new().into();
        assert!(matches!(packet, Packet::Unknown));
    }

    #[test]
    fn ping_roundtrip_keeps_timestamp() {
        let bytes: Vec<u8> = Packet::Ping { timestamp: 1700000000000 }.into();
        let packet: Packet = bytes.into();

        assert!(matches!(packet, Packet::Ping { timestamp: 1700000000000 }));
    }
}
