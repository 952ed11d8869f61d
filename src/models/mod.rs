pub mod moon;
pub mod tiles;
pub mod widget;
pub mod widget_kind;
