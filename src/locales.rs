use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Failed to load locale file: {0}")]
    LoadError(String),
    #[error("Failed to parse locale file: {0}")]
    ParseError(String),
    #[error("Locale not found: {0}")]
    LocaleNotFound(String),
}

impl From<std::io::Error> for LocaleError {
    fn from(err: std::io::Error) -> Self {
        LocaleError::LoadError(err.to_string())
    }
}

/// 运行时本地化表，从目录中的 `<locale>.yml` 文件加载
///
/// 嵌套的 YAML 键会被展平成 `a.b.c` 形式，供控制器在请求处理期间查询。
pub struct Locales {
    translations: HashMap<String, HashMap<String, String>>,
    default_locale: String,
}

fn flatten(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                if let Some(key) = k.as_str() {
                    let child = if prefix.is_empty() {
                        key.to_string()
                    } else {
                        format!("{}.{}", prefix, key)
                    };
                    flatten(v, &child, out);
                }
            }
        }
        serde_yaml::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        _ => {}
    }
}

impl Locales {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, LocaleError> {
        let mut translations = HashMap::new();

        for entry in fs::read_dir(path)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "yml") {
                continue;
            }
            let locale = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| LocaleError::LoadError(path.display().to_string()))?
                .to_string();

            let content = fs::read_to_string(&path)?;
            let value: serde_yaml::Value = serde_yaml::from_str(&content).map_err(|e| {
                LocaleError::ParseError(format!("Failed to parse {}: {}", path.display(), e))
            })?;

            let mut table = HashMap::new();
            flatten(&value, "", &mut table);
            translations.insert(locale, table);
        }

        Ok(Self { translations, default_locale: String::new() })
    }

    pub fn set_default(&mut self, locale: &str) -> Result<(), LocaleError> {
        if !self.translations.contains_key(locale) {
            return Err(LocaleError::LocaleNotFound(locale.to_string()));
        }
        self.default_locale = locale.to_string();
        Ok(())
    }

    /// 使用默认语言查询，键不存在时原样返回键本身
    pub fn t(&self, key: &str) -> String {
        self.translate(&self.default_locale, key).unwrap_or_else(|_| key.to_string())
    }

    pub fn translate(&self, locale: &str, key: &str) -> Result<String, LocaleError> {
        self.translations
            .get(locale)
            .and_then(|table| table.get(key).cloned())
            .ok_or_else(|| LocaleError::LocaleNotFound(key.to_string()))
    }
}
