use crate::arena::Handle;

/// What a slot on a level holds.
///
/// `Data` stores the handle of the element in the list's value arena rather than the element
/// itself, so every node of a tower shares one element and the handle doubles as the identity of
/// the insertion instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot {
    Head,
    Data(Handle),
    Tail,
}

#[derive(Clone, Debug)]
pub struct Node {
    pub slot: Slot,
    // `None` only for the tail
    pub next: Option<Handle>,
    // `None` on level 0 and for the tail
    pub down: Option<Handle>,
}

impl Node {
    pub fn head(next: Handle, down: Option<Handle>) -> Self {
        Node {
            slot: Slot::Head,
            next: Some(next),
            down,
        }
    }

    pub fn tail() -> Self {
        Node {
            slot: Slot::Tail,
            next: None,
            down: None,
        }
    }

    pub fn data(value: Handle, next: Handle, down: Option<Handle>) -> Self {
        Node {
            slot: Slot::Data(value),
            next: Some(next),
            down,
        }
    }
}
