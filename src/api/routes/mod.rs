pub mod handicap;
pub mod head_to_head;
