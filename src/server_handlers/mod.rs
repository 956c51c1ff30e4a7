pub mod geracao;
pub mod health;
pub mod respostas;

pub use geracao::*;
pub use health::*;
