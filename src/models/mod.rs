// src/models/mod.rs

// 1. Объявляем модули
pub mod employee;
pub mod maintenance;
pub mod product;

// 2. Ре-экспортируем содержимое, чтобы структуры были доступны как crate::models::StructName
pub use employee::*;
pub use maintenance::*;
pub use product::*;
