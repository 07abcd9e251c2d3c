/// Host-side validation failures.
///
/// Every variant is raised before the bus is touched. The controller cannot
/// report anything back, so these are the only errors the driver has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("coordinate ({x}, {y}) is outside the 220x176 panel")]
    OutOfBounds { x: u16, y: u16 },
    #[error("window start lies past its end")]
    InvertedWindow,
    #[error("area has zero width or height")]
    EmptyArea,
    #[error("tile scale must be at least 1")]
    ZeroScale,
    #[error("pixel stream overran its {expected}-pixel window")]
    StreamOverrun { expected: u32 },
    #[error("cursor ({x}, {y}) lies outside the active window")]
    OutsideWindow { x: u16, y: u16 },
    #[error("scroll offset {0} is past the last scroll line")]
    ScrollOutOfRange(u8),
    #[error("no palette with id {0}")]
    UnknownPalette(u8),
}
