//! Configuração do serviço a partir de variáveis de ambiente (e `.env`).

use std::env;
use std::path::{Path, PathBuf};

/// Pasta com templates e planilhas de entrada, relativa à raiz do projeto.
pub const COMPLEMENTOS_DIR: &str = "complementos";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub base_dir: PathBuf,
    pub output_dir: PathBuf,
    pub workers: usize,
    pub log_level: String,
}

fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Filtro de log padrão (`GERADOR_LOG`). Lido separado para o logger já
/// estar ativo enquanto a raiz do projeto é detectada.
pub fn nivel_log() -> String {
    load_dotenv();
    env::var("GERADOR_LOG").unwrap_or_else(|_| "info".to_string())
}

impl AppConfig {
    /// Lê a configuração do ambiente. Nunca falha: valores ausentes ou
    /// inválidos caem nos padrões.
    pub fn from_env() -> Self {
        load_dotenv();

        let bind_addr = env::var("GERADOR_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let base_dir = resolve_base_dir();
        let output_dir = match env::var("GERADOR_OUTPUT_DIR") {
            Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
            _ => base_dir.join("output"),
        };
        let workers = env::var("GERADOR_WORKERS")
            .ok()
            .and_then(|w| w.trim().parse::<usize>().ok())
            .filter(|w| *w > 0)
            .unwrap_or_else(num_cpus::get);
        let log_level = nivel_log();

        AppConfig { bind_addr, base_dir, output_dir, workers, log_level }
    }

    /// Configuração apontando para uma raiz explícita (útil em testes).
    pub fn with_base_dir<P: AsRef<Path>>(base_dir: P) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        AppConfig {
            bind_addr: "127.0.0.1:8000".to_string(),
            output_dir: base_dir.join("output"),
            base_dir,
            workers: 1,
            log_level: "info".to_string(),
        }
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.base_dir.join(COMPLEMENTOS_DIR).join("templates")
    }

    pub fn dados_dir(&self) -> PathBuf {
        self.base_dir.join(COMPLEMENTOS_DIR).join("dados")
    }
}

/// Resolve a raiz do projeto:
/// 1. `GERADOR_BASE_DIR` se existir
/// 2. CWD ou o pai do CWD, se contiver `complementos/`
/// 3. ancestrais do executável que contenham `complementos/`
/// 4. CWD
fn resolve_base_dir() -> PathBuf {
    if let Ok(path) = env::var("GERADOR_BASE_DIR") {
        let p = PathBuf::from(path);
        if p.exists() {
            log::info!("usando GERADOR_BASE_DIR: {:?}", p);
            return p;
        }
        log::warn!("GERADOR_BASE_DIR aponta para {:?}, que não existe", p);
    }

    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut candidates = vec![cwd.clone()];
    if let Some(parent) = cwd.parent() {
        candidates.push(parent.to_path_buf());
    }
    if let Ok(exe) = env::current_exe() {
        candidates.extend(exe.ancestors().skip(1).take(4).map(Path::to_path_buf));
    }

    for candidate in candidates {
        if candidate.join(COMPLEMENTOS_DIR).is_dir() {
            log::debug!("complementos encontrados em {:?}", candidate);
            return candidate;
        }
    }

    log::warn!("pasta '{}' não encontrada; usando CWD {:?}", COMPLEMENTOS_DIR, cwd);
    cwd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_dir_derives_resource_dirs() {
        let cfg = AppConfig::with_base_dir("/srv/escola");
        assert_eq!(cfg.templates_dir(), PathBuf::from("/srv/escola/complementos/templates"));
        assert_eq!(cfg.dados_dir(), PathBuf::from("/srv/escola/complementos/dados"));
        assert_eq!(cfg.output_dir, PathBuf::from("/srv/escola/output"));
    }
}
