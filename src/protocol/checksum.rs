//! Frame checksum: CRC-16/XMODEM (poly 0x1021, init 0x0000)

use crc::{CRC_16_XMODEM, Crc};

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Checksum over a frame's header and payload bytes, in wire order
#[must_use]
pub fn checksum(bytes: &[u8]) -> u16 {
    CRC16.checksum(bytes)
}

/// Checksum over a header and a payload held in separate buffers
#[must_use]
pub(crate) fn checksum_parts(header: &[u8], payload: &[u8]) -> u16 {
    let mut digest = CRC16.digest();
    digest.update(header);
    digest.update(payload);
    digest.finalize()
}
