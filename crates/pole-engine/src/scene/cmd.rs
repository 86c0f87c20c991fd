use crate::scene::shapes::ring::RingCmd;
use crate::scene::shapes::text::TextCmd;

/// One overlay primitive. Each variant has a matching batch renderer in
/// `render::shapes`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Ring(RingCmd),
    Text(TextCmd),
}
