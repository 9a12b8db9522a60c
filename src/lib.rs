pub mod crawler;
pub mod robots;
