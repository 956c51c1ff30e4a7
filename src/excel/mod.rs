//! Módulo `excel`: leitura das planilhas de escopo-sequência.
//!
//! Submódulos:
//! - `io`: conversão de células e carga de abas (`ler_tabela`, `listar_abas`)
//! - `colunas`: resolução de colunas por sinônimos e mapeamento para `LinhaAula`

/// Helpers de IO para leitura de workbooks
pub mod io;

/// Resolução de colunas e conversão de linhas
pub mod colunas;

pub use colunas::{encontrar_coluna, mapear_linhas, resolver_coluna, Campo};
pub use io::{aba_mais_parecida, cell_to_string, ler_tabela, listar_abas, Tabela};
