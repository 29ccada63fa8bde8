use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum InterpError
{
    GridTooShort,
    GridNotIncreasing,
    ValuesShapeMismatch,
    DimensionMismatch,
    BatchSizeMismatch,
    PreparationNotCached,
    PreparationMismatch,
    LZ4DecompressionFailed,
    ReadBufferFailed,
    WriteBufferFailed,
    SerializationFailed,
    DeserializationFailed,
    FileIOError,
}
impl std::error::Error for InterpError {}

impl Display for InterpError
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", *self)
    }
}
