/// Paint layer of a draw item; higher layers paint over lower ones and
/// items on the same layer keep recording order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);
