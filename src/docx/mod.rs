//! Renderização de templates `.docx` com marcadores `{{ Chave }}`.
//!
//! O Word costuma quebrar um marcador em vários `<w:r>`/`<w:t>`; por isso o
//! texto é juntado por parágrafo antes da substituição. O resultado do
//! parágrafo vai inteiro para o primeiro `<w:t>` e os demais ficam vazios.
//! Quebras de linha no valor viram `<w:br/>`. Partes do pacote que não são
//! documento, cabeçalho ou rodapé são copiadas sem alteração.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{GeradorError, Result};

/// Contexto plano chave → valor passado ao template.
pub type Contexto = BTreeMap<String, String>;

/// Lê o template do disco e renderiza.
pub fn renderizar_template<P: AsRef<Path>>(template: P, contexto: &Contexto) -> Result<Vec<u8>> {
    let template = template.as_ref();
    if !template.is_file() {
        return Err(GeradorError::TemplateNotFound(template.to_path_buf()));
    }
    let bytes = std::fs::read(template)?;
    renderizar_bytes(&bytes, contexto)
}

/// Renderiza um pacote `.docx` em memória.
pub fn renderizar_bytes(docx: &[u8], contexto: &Contexto) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(docx))?;
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_string();
        let options = FileOptions::default().compression_method(file.compression());
        if file.is_dir() {
            out.add_directory(name, options)?;
            continue;
        }

        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;
        let conteudo = if parte_renderizavel(&name) {
            log::debug!("renderizando parte {}", name);
            renderizar_xml(&buf, contexto)?
        } else {
            buf
        };

        out.start_file(name, options)?;
        out.write_all(&conteudo)?;
    }

    let cursor = out.finish()?;
    Ok(cursor.into_inner())
}

fn parte_renderizavel(name: &str) -> bool {
    name == "word/document.xml"
        || (name.starts_with("word/header") && name.ends_with(".xml"))
        || (name.starts_with("word/footer") && name.ends_with(".xml"))
}

/// Substitui `{{ chave }}` em `texto`. Chaves desconhecidas viram string vazia;
/// `{{` sem fechamento fica como está.
pub fn substituir_marcadores(texto: &str, contexto: &Contexto) -> String {
    let mut out = String::with_capacity(texto.len());
    let mut resto = texto;
    while let Some(ini) = resto.find("{{") {
        let Some(fim) = resto[ini + 2..].find("}}") else {
            break;
        };
        out.push_str(&resto[..ini]);
        let chave = resto[ini + 2..ini + 2 + fim].trim();
        match contexto.get(chave) {
            Some(v) => out.push_str(v),
            None => log::debug!("marcador sem valor no contexto: {}", chave),
        }
        resto = &resto[ini + 2 + fim + 2..];
    }
    out.push_str(resto);
    out
}

fn abre(ev: &Event, tag: &[u8]) -> bool {
    matches!(ev, Event::Start(e) if e.name().as_ref() == tag)
}

fn fecha(ev: &Event, tag: &[u8]) -> bool {
    matches!(ev, Event::End(e) if e.name().as_ref() == tag)
}

/// Renderiza um XML do WordprocessingML.
pub fn renderizar_xml(xml: &[u8], contexto: &Contexto) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::new());
    // pilha de parágrafos abertos (w:p pode aparecer dentro de caixas de texto)
    let mut pilha: Vec<Vec<Event<'static>>> = Vec::new();

    loop {
        let evento = reader.read_event()?.into_owned();
        if matches!(evento, Event::Eof) {
            break;
        }
        if abre(&evento, b"w:p") {
            pilha.push(vec![evento]);
        } else if fecha(&evento, b"w:p") {
            let mut paragrafo = pilha.pop().unwrap_or_default();
            paragrafo.push(evento);
            let renderizado = renderizar_paragrafo(paragrafo, contexto)?;
            match pilha.last_mut() {
                Some(pai) => pai.extend(renderizado),
                None => {
                    for ev in renderizado {
                        writer.write_event(ev)?;
                    }
                }
            }
        } else {
            match pilha.last_mut() {
                Some(p) => p.push(evento),
                None => writer.write_event(evento)?,
            }
        }
    }

    // XML malformado com w:p sem fechamento: devolve o que sobrou como veio
    for paragrafo in pilha {
        for ev in paragrafo {
            writer.write_event(ev)?;
        }
    }
    Ok(writer.into_inner())
}

/// Junta os textos de `<w:t>` do parágrafo; se houver marcador, reescreve.
fn renderizar_paragrafo(eventos: Vec<Event<'static>>, contexto: &Contexto) -> Result<Vec<Event<'static>>> {
    let mut em_wt = false;
    let mut textos: Vec<usize> = Vec::new();
    let mut juntado = String::new();

    for (i, ev) in eventos.iter().enumerate() {
        if abre(ev, b"w:t") {
            em_wt = true;
        } else if fecha(ev, b"w:t") {
            em_wt = false;
        } else if let (true, Event::Text(t)) = (em_wt, ev) {
            juntado.push_str(&t.unescape()?);
            textos.push(i);
        }
    }

    if !juntado.contains("{{") {
        return Ok(eventos);
    }
    let renderizado = substituir_marcadores(&juntado, contexto);
    let primeiro = textos[0];

    let mut saida: Vec<Event<'static>> = Vec::with_capacity(eventos.len() + 4);
    let mut em_wt = false;
    for (i, ev) in eventos.into_iter().enumerate() {
        if abre(&ev, b"w:t") {
            em_wt = true;
            saida.push(Event::Start(
                BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
            ));
            continue;
        }
        if fecha(&ev, b"w:t") {
            em_wt = false;
            saida.push(ev);
            continue;
        }
        match ev {
            Event::Text(_) if em_wt && i == primeiro => {
                let mut linhas = renderizado.split('\n');
                if let Some(l) = linhas.next() {
                    saida.push(Event::Text(BytesText::new(l).into_owned()));
                }
                for l in linhas {
                    saida.push(Event::End(BytesEnd::new("w:t")));
                    saida.push(Event::Empty(BytesStart::new("w:br")));
                    saida.push(Event::Start(
                        BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
                    ));
                    saida.push(Event::Text(BytesText::new(l).into_owned()));
                }
            }
            Event::Text(_) if em_wt => {}
            ev => saida.push(ev),
        }
    }
    Ok(saida)
}
