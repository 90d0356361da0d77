use crate::template::color::HexColor;

/// Shared background color pool. Variant plans index into it.
pub const PALETTE: [&str; 11] = [
    "FFFFFF", "000000", "5BB5D9", "F2B6C6", "BF2A70", "C5D3D9", "03A696", "F27F3D", "72A1A6",
    "F2E1C2", "D9B68B",
];

pub fn palette() -> Vec<HexColor> {
    PALETTE.iter().map(|hex| HexColor::new(*hex)).collect()
}
