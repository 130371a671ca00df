pub mod editor;
pub mod slots;
