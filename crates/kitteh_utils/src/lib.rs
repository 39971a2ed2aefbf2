pub mod keyvec;
pub mod lookahead;
pub mod peek;
