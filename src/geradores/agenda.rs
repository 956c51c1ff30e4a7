//! Agenda mensal do professor em `.xlsx`.
//!
//! Cada semana do mês vira um bloco: cabeçalho com os dias úteis, linha de
//! datas e as nove aulas. Colunas de dias que caem no mês anterior ou no
//! seguinte ficam em branco para manter segunda..sexta alinhadas.

use chrono::{Datelike, NaiveDate};
use std::io::Cursor;
use umya_spreadsheet::{Border, HorizontalAlignmentValues, Spreadsheet, VerticalAlignmentValues, Worksheet};

use crate::error::{GeradorError, Result};
use crate::models::{DocumentoGerado, MIME_XLSX};

pub static MESES: [&str; 12] = [
    "JANEIRO", "FEVEREIRO", "MARÇO", "ABRIL", "MAIO", "JUNHO",
    "JULHO", "AGOSTO", "SETEMBRO", "OUTUBRO", "NOVEMBRO", "DEZEMBRO",
];

/// Segunda a sexta.
pub static DIAS_SEMANA: [&str; 5] = [
    "SEGUNDA-FEIRA", "TERÇA-FEIRA", "QUARTA-FEIRA", "QUINTA-FEIRA", "SEXTA-FEIRA",
];

pub static AULAS: [&str; 9] = [
    "1ª aula", "2ª aula", "3ª aula", "4ª aula", "5ª aula",
    "6ª aula", "7ª aula", "8ª aula", "9ª aula",
];

const FILL_TITULO: &str = "FFD9E1F2";
const FILL_CABECALHO: &str = "FF4F81BD";
const FILL_AULA: &str = "FFF2F2F2";
const FONTE_BRANCA: &str = "FFFFFFFF";
const LARGURA_COLUNA: f64 = 18.0;
const ALTURA_LINHA: f64 = 20.0;
const LINHA_INICIAL: u32 = 3;

/// Uma semana da agenda: dia do mês por coluna (segunda = 0), `None` para
/// as colunas reservadas de outro mês.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Semana {
    pub dias: [Option<u32>; 5],
}

impl Semana {
    pub fn dias_do_mes(&self) -> impl Iterator<Item = u32> + '_ {
        self.dias.iter().filter_map(|d| *d)
    }
}

fn primeiro_dia(mes: u32, ano: i32) -> Result<NaiveDate> {
    if !(1..=12).contains(&mes) {
        return Err(GeradorError::InvalidParameter {
            param: "mes".to_string(),
            motivo: format!("deve estar entre 1 e 12, recebido {}", mes),
        });
    }
    NaiveDate::from_ymd_opt(ano, mes, 1).ok_or_else(|| GeradorError::InvalidParameter {
        param: "ano".to_string(),
        motivo: format!("data inválida {:02}/{}", mes, ano),
    })
}

/// Semanas (segunda a domingo) que têm pelo menos um dia útil no mês.
pub fn semanas_agenda(mes: u32, ano: i32) -> Result<Vec<Semana>> {
    let inicio = primeiro_dia(mes, ano)?;
    let mut semanas: Vec<Semana> = Vec::new();
    let mut atual = Semana { dias: [None; 5] };
    let mut tem_dia = false;

    for data in inicio.iter_days().take_while(|d| d.month() == mes) {
        let coluna = data.weekday().num_days_from_monday() as usize;
        if coluna < 5 {
            atual.dias[coluna] = Some(data.day());
            tem_dia = true;
        }
        if coluna == 6 {
            if tem_dia {
                semanas.push(atual);
            }
            atual = Semana { dias: [None; 5] };
            tem_dia = false;
        }
    }
    if tem_dia {
        semanas.push(atual);
    }
    Ok(semanas)
}

pub fn titulo_agenda(professor: &str, mes: u32, ano: i32) -> Result<String> {
    primeiro_dia(mes, ano)?;
    Ok(format!(
        "AGENDA PROFESSOR: {} - {} {}",
        professor.to_uppercase(),
        MESES[(mes - 1) as usize],
        ano
    ))
}

pub fn nome_arquivo_agenda(professor: &str, mes: u32, ano: i32) -> String {
    let professor = professor.replace(' ', "_").replace(['/', '\\'], "_");
    format!("Agenda_{}_{:02}_{}.xlsx", professor, mes, ano)
}

fn celula_com_borda(ws: &mut Worksheet, col: u32, row: u32) {
    let style = ws.get_style_mut((col, row));
    let borders = style.get_borders_mut();
    borders.get_left_mut().set_border_style(Border::BORDER_THIN);
    borders.get_right_mut().set_border_style(Border::BORDER_THIN);
    borders.get_top_mut().set_border_style(Border::BORDER_THIN);
    borders.get_bottom_mut().set_border_style(Border::BORDER_THIN);
    let alignment = style.get_alignment_mut();
    alignment.set_horizontal(HorizontalAlignmentValues::Center);
    alignment.set_vertical(VerticalAlignmentValues::Center);
}

fn escrever_cabecalho(ws: &mut Worksheet, col: u32, row: u32, texto: &str) {
    ws.get_cell_mut((col, row)).set_value(texto);
    celula_com_borda(ws, col, row);
    let style = ws.get_style_mut((col, row));
    style.set_background_color(FILL_CABECALHO);
    let font = style.get_font_mut();
    font.set_bold(true);
    font.get_color_mut().set_argb(FONTE_BRANCA);
}

fn escrever_bloco(ws: &mut Worksheet, linha: u32, semana: &Semana, mes: u32) {
    escrever_cabecalho(ws, 1, linha, "AULAS");

    for (i, dia) in semana.dias.iter().enumerate() {
        let col = i as u32 + 2;
        match dia {
            Some(d) => {
                escrever_cabecalho(ws, col, linha, DIAS_SEMANA[i]);
                ws.get_cell_mut((col, linha + 1)).set_value(format!("{:02}/{:02}", d, mes));
                ws.get_style_mut((col, linha + 1)).get_font_mut().set_bold(true);
            }
            None => {
                celula_com_borda(ws, col, linha);
                ws.get_style_mut((col, linha)).set_background_color(FILL_CABECALHO);
            }
        }
        celula_com_borda(ws, col, linha + 1);
    }

    for (i, aula) in AULAS.iter().enumerate() {
        let row = linha + 2 + i as u32;
        ws.get_cell_mut((1, row)).set_value(*aula);
        celula_com_borda(ws, 1, row);
        ws.get_style_mut((1, row)).set_background_color(FILL_AULA);
        for col in 2..=6 {
            celula_com_borda(ws, col, row);
            if i == 0 {
                ws.get_style_mut((col, row)).set_background_color(FILL_AULA);
            }
        }
    }
}

/// Monta a planilha em memória.
pub fn montar_planilha(mes: u32, ano: i32, professor: &str) -> Result<Spreadsheet> {
    let titulo = titulo_agenda(professor, mes, ano)?;
    let semanas = semanas_agenda(mes, ano)?;

    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    let nome_aba = format!("Agenda {:02}-{}", mes, ano);
    let ws = book
        .new_sheet(&nome_aba)
        .map_err(|e| GeradorError::Spreadsheet(e.to_string()))?;

    ws.add_merge_cells("A1:F1");
    ws.get_cell_mut((1, 1)).set_value(titulo);
    {
        let style = ws.get_style_mut((1, 1));
        style.set_background_color(FILL_TITULO);
        let font = style.get_font_mut();
        font.set_bold(true);
        font.set_size(14.0);
        let alignment = style.get_alignment_mut();
        alignment.set_horizontal(HorizontalAlignmentValues::Center);
        alignment.set_vertical(VerticalAlignmentValues::Center);
    }

    let mut linha = LINHA_INICIAL;
    for semana in &semanas {
        escrever_bloco(ws, linha, semana, mes);
        linha += AULAS.len() as u32 + 2;
    }

    for col in ["A", "B", "C", "D", "E", "F", "G"] {
        ws.get_column_dimension_mut(col).set_width(LARGURA_COLUNA);
    }
    for row in 1..linha {
        ws.get_row_dimension_mut(&row).set_height(ALTURA_LINHA);
    }

    log::debug!("agenda {}: {} semanas", nome_aba, semanas.len());
    Ok(book)
}

/// Gera a agenda do mês como `.xlsx`.
pub fn criar_agenda(mes: u32, ano: i32, professor: &str) -> Result<DocumentoGerado> {
    let book = montar_planilha(mes, ano, professor)?;
    let mut cursor = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor)
        .map_err(|e| GeradorError::Spreadsheet(e.to_string()))?;

    Ok(DocumentoGerado {
        bytes: cursor.into_inner(),
        file_name: nome_arquivo_agenda(professor, mes, ano),
        mime_type: MIME_XLSX,
    })
}
