// Fixtures compartilhadas: planilhas de escopo-sequência e templates .docx
// gerados em diretório temporário.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use geradocs::config::AppConfig;

pub const CABECALHO_PADRAO: [&str; 5] = ["Ano/Série", "Bimestre", "Título da Aula", "Conteúdo", "Objetivos"];

/// Linhas da aba "Matemática" usadas na maioria dos testes.
pub fn linhas_matematica() -> Vec<Vec<&'static str>> {
    vec![
        vec!["6º ano", "1º Bimestre", "Frações", "Frações equivalentes", "Comparar frações"],
        vec!["6º ano", "1º Bimestre", "Frações", "Soma de frações", "Somar frações"],
        vec!["6º ano", "1º Bimestre", "", "Linha sem título", "Ignorada"],
        vec!["6º ano", "2º Bimestre", "Decimais", "Números decimais", "Operar decimais"],
        vec!["7º ano", "1º Bimestre", "Inteiros", "Números negativos", "Ordenar inteiros"],
    ]
}

/// Cria um .xlsx com uma aba por entrada (primeira linha = cabeçalho).
pub fn criar_planilha(path: &Path, abas: &[(&str, Vec<&str>, Vec<Vec<&str>>)]) {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for (nome, cabecalho, linhas) in abas {
        let ws = book.new_sheet(*nome).expect("Deve criar aba");
        for (c, titulo) in cabecalho.iter().enumerate() {
            ws.get_cell_mut((c as u32 + 1, 1)).set_value(*titulo);
        }
        for (r, linha) in linhas.iter().enumerate() {
            for (c, valor) in linha.iter().enumerate() {
                ws.get_cell_mut((c as u32 + 1, r as u32 + 2)).set_value(*valor);
            }
        }
    }
    std::fs::create_dir_all(path.parent().expect("Deve ter pasta")).expect("Deve criar pasta");
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("Deve gravar planilha");
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Monta `word/document.xml` com um parágrafo por texto. Um texto pode vir
/// quebrado em vários runs separando as partes com `|`.
pub fn documento_xml(paragrafos: &[&str]) -> String {
    let mut corpo = String::new();
    for p in paragrafos {
        corpo.push_str("<w:p>");
        for run in p.split('|') {
            corpo.push_str(&format!("<w:r><w:rPr><w:b/></w:rPr><w:t>{}</w:t></w:r>", run));
        }
        corpo.push_str("</w:p>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        corpo
    )
}

/// Cria um .docx mínimo, sem compressão, com um estilo de enchimento para o
/// resultado passar do tamanho mínimo.
pub fn criar_template(path: &Path, paragrafos: &[&str]) {
    std::fs::create_dir_all(path.parent().expect("Deve ter pasta")).expect("Deve criar pasta");
    let file = std::fs::File::create(path).expect("Deve criar template");
    let mut zip = ZipWriter::new(file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Stored);

    let estilos = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><!-- {} --></w:styles>"#,
        "x".repeat(2048)
    );
    let partes = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", RELS.to_string()),
        ("word/document.xml", documento_xml(paragrafos)),
        ("word/styles.xml", estilos),
    ];
    for (nome, conteudo) in partes {
        zip.start_file(nome, opts).expect("Deve iniciar parte");
        zip.write_all(conteudo.as_bytes()).expect("Deve gravar parte");
    }
    zip.finish().expect("Deve fechar zip");
}

/// Lê uma parte do pacote gerado.
pub fn ler_parte(docx: &[u8], nome: &str) -> String {
    let mut archive = ZipArchive::new(std::io::Cursor::new(docx)).expect("Deve abrir docx");
    let mut parte = archive.by_name(nome).expect("Deve ter a parte");
    let mut s = String::new();
    parte.read_to_string(&mut s).expect("Deve ler a parte");
    s
}

/// Raiz temporária com templates e a planilha do ciclo 2.
pub fn montar_base(dir: &Path) -> AppConfig {
    let cfg = AppConfig::with_base_dir(dir);
    criar_template(
        &cfg.templates_dir().join("template_guia_aprendizagem_2025.docx"),
        &[
            "Professor: {{ Professor }} | Disciplina: {{ Disciplina }}",
            "{{ AnoSerie }} - {{ Bim|estre }}º bimestre",
            "{{Titulo}}",
            "{{ Conteudo }}",
            "{{ Objetivos }}",
            "{{ Fontes }}",
        ],
    );
    criar_template(
        &cfg.templates_dir().join("template_eletivas_2025.docx"),
        &[
            "{{ TITULO }}{{ ANO_SERIE }}",
            "Tema: {{ TEMA }}",
            "{{ PROFESSOR1 }} / {{ PROFESSOR2 }}",
            "{{ JUSTIFICATIVA }}",
            "{{ OBJETIVO }}",
            "Gerado em {{ DATA_GERACAO }}",
        ],
    );
    criar_planilha(
        &cfg.dados_dir().join("2. Anos Finais - Escopo-sequência 2025.xlsx"),
        &[
            ("Matemática", CABECALHO_PADRAO.to_vec(), linhas_matematica()),
            ("Língua Portuguesa", CABECALHO_PADRAO.to_vec(), vec![vec!["6º ano", "1", "Leitura", "Contos", "Ler"]]),
            ("Arte", vec!["Série", "Bimestre", "Conteúdo"], vec![vec!["6º", "1", "Cores"]]),
        ],
    );
    cfg
}
