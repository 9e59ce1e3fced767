mod cursor;

pub use cursor::CursorSnapshot;
