//! Lógica de dados do guia de aprendizagem: filtro da planilha, formatação de
//! seções e parser das fontes.

pub mod filtros;
pub mod fontes;
pub mod secoes;

pub use filtros::{filtrar_linhas, valores_distintos};
pub use fontes::{formatar_fontes, FontesEntrada, FONTES_PADRAO, SEM_FONTES};
pub use secoes::{formatar_secao, SEM_CONTEUDO};
