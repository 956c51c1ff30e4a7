pub const SEM_CONTEUDO: &str = "Nenhum conteúdo disponível";

/// Junta os valores distintos (após `trim`, comparação exata) em tópicos
/// "• item" separados por linha em branco, na ordem em que aparecem.
pub fn formatar_secao<I, S>(dados: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut itens_unicos: Vec<String> = Vec::new();
    for item in dados {
        let item_limpo = item.as_ref().trim();
        if !item_limpo.is_empty() && !itens_unicos.iter().any(|i| i == item_limpo) {
            itens_unicos.push(item_limpo.to_string());
        }
    }

    if itens_unicos.is_empty() {
        return SEM_CONTEUDO.to_string();
    }
    itens_unicos.iter().map(|i| format!("• {}", i)).collect::<Vec<_>>().join("\n\n")
}
