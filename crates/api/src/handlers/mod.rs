pub mod pages;
pub mod tours;
