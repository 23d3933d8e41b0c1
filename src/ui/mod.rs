pub mod bands;
pub mod dialogs;
pub mod interval_list;
pub mod theme;
pub mod toolbar;
pub mod week_view;
