pub mod csrf;
