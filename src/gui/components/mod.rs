// src/gui/components/mod.rs
pub mod data_table;
pub mod export_bar;
pub mod plots;
pub mod tabs;
