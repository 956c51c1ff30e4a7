//! Nomes de arquivo e entrega do documento (base64 ou arquivo em disco).

use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::path::Path;

use crate::error::{GeradorError, Result};
use crate::models::{DocumentoGerado, Saida};

/// Abaixo disso o render quase certamente saiu corrompido.
pub const MIN_DOCUMENT_BYTES: usize = 1024;

/// Troca tudo que não for letra, dígito, espaço ou `_-()` por `_`, passa para
/// maiúsculas e troca espaços por `_`.
pub fn sanitizar_nome_arquivo(nome: &str) -> String {
    nome.chars()
        .map(|c| if c.is_alphanumeric() || " _-()".contains(c) { c } else { '_' })
        .collect::<String>()
        .to_uppercase()
        .replace(' ', "_")
}

/// Recorta pelos primeiros `n` caracteres (não bytes).
pub fn prefixo(texto: &str, n: usize) -> String {
    texto.chars().take(n).collect()
}

/// Valida o tamanho e entrega o documento.
///
/// Com `return_base64` o conteúdo volta inline; senão é gravado em
/// `<output_dir>/<subdir>/<file_name>` e volta o caminho.
pub fn entregar(doc: DocumentoGerado, return_base64: bool, output_dir: &Path, subdir: &str) -> Result<Saida> {
    if doc.bytes.len() < MIN_DOCUMENT_BYTES {
        return Err(GeradorError::GenerationTooSmall {
            bytes: doc.bytes.len(),
            minimo: MIN_DOCUMENT_BYTES,
        });
    }

    if return_base64 {
        log::info!("{} gerado ({} bytes), retornando base64", doc.file_name, doc.bytes.len());
        return Ok(Saida::Base64 {
            file_base64: general_purpose::STANDARD.encode(&doc.bytes),
            file_name: doc.file_name,
            mime_type: doc.mime_type.to_string(),
        });
    }

    let pasta = output_dir.join(subdir);
    fs::create_dir_all(&pasta)?;
    let caminho = pasta.join(&doc.file_name);
    fs::write(&caminho, &doc.bytes)?;
    log::info!("{} salvo em {:?}", doc.file_name, caminho);

    Ok(Saida::Arquivo {
        file_path: caminho.to_string_lossy().into_owned(),
        file_name: doc.file_name,
        mime_type: doc.mime_type.to_string(),
    })
}
