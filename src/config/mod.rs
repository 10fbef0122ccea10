//! Configuration loading and management
//!
//! Each list screen is described once: which fields its search box looks
//! at, how it is sorted when it opens, and which page sizes it offers.
//!
//! ```yaml
//! screens:
//!   - name: ventas
//!     search_fields: [cliente.nombre]
//!     default_sort: fecha:desc
//!     page_size: 10
//!     page_size_options: [10, 25, 50]
//! ```

use crate::core::error::ConfigError;
use crate::core::field::FieldPath;
use crate::core::pipeline::ListView;
use crate::core::query::PageWindow;
use crate::core::sort::SortSpec;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_page_size() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 25]
}

/// Configuration for one list screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Screen identifier (e.g., "clientes", "ventas")
    pub name: String,

    /// Fields searched in addition to `id`
    #[serde(default)]
    pub search_fields: Vec<FieldPath>,

    /// Sort applied when the screen opens (`field:asc` / `field:desc`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,

    /// Rows per page when the screen opens
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Choices offered by the rows-per-page selector (empty for none)
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,

    /// Rows shown before "show all" on report tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_rows: Option<usize>,
}

impl ScreenConfig {
    pub fn new(name: &str, search_fields: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            search_fields: search_fields.iter().map(|f| FieldPath::parse(f)).collect(),
            default_sort: None,
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            preview_rows: None,
        }
    }

    fn sorted(mut self, sort: &str) -> Self {
        self.default_sort = Some(sort.to_string());
        self
    }

    fn paged(mut self, page_size: usize, options: &[usize]) -> Self {
        self.page_size = page_size;
        self.page_size_options = options.to_vec();
        self
    }

    fn report(mut self, preview_rows: usize) -> Self {
        self.preview_rows = Some(preview_rows);
        self
    }

    /// Parse the default sort expression
    pub fn sort_spec(&self) -> Result<Option<SortSpec>, ConfigError> {
        self.default_sort
            .as_deref()
            .map(SortSpec::parse)
            .transpose()
            .map_err(|source| ConfigError::InvalidDefaultSort {
                screen: self.name.clone(),
                source,
            })
    }

    /// Check page sizes and the default sort
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize {
                screen: self.name.clone(),
            });
        }
        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&self.page_size)
        {
            return Err(ConfigError::PageSizeNotOffered {
                screen: self.name.clone(),
                page_size: self.page_size,
            });
        }
        self.sort_spec()?;
        Ok(())
    }

    /// Initial list state for this screen
    ///
    /// An unparseable default sort is logged and the screen opens unsorted.
    pub fn list_view(&self) -> ListView {
        let view = ListView::new(self.search_fields.iter().cloned())
            .with_window(PageWindow::new(0, self.page_size.max(1)));

        match self.sort_spec() {
            Ok(Some(sort)) => view.with_sort(sort),
            Ok(None) => view,
            Err(e) => {
                tracing::warn!(screen = %self.name, error = %e, "ignoring default sort");
                view
            }
        }
    }
}

/// Complete configuration for the list screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScreensConfig {
    /// List of screen configurations
    #[serde(default)]
    pub screens: Vec<ScreenConfig>,
}

impl ScreensConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading screen config {}", path.display()))?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            screens = config.screens.len(),
            "loaded screen config"
        );
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Merge several configurations
    ///
    /// A screen defined again in a later configuration replaces the earlier
    /// definition but keeps its original position.
    pub fn merge(configs: Vec<ScreensConfig>) -> Self {
        let mut screens: IndexMap<String, ScreenConfig> = IndexMap::new();
        for screen in configs.into_iter().flat_map(|c| c.screens) {
            if screens.contains_key(&screen.name) {
                tracing::debug!(screen = %screen.name, "screen config overridden");
            }
            screens.insert(screen.name.clone(), screen);
        }
        Self {
            screens: screens.into_values().collect(),
        }
    }

    /// Find a screen by name
    pub fn screen(&self, name: &str) -> Result<&ScreenConfig, ConfigError> {
        self.screens
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ConfigError::UnknownScreen {
                name: name.to_string(),
            })
    }

    /// Validate every screen, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.screens.iter().try_for_each(ScreenConfig::validate)
    }

    /// Screens of the business application
    pub fn default_config() -> Self {
        Self {
            screens: vec![
                ScreenConfig::new("clientes", &["nombre", "cedula", "telefono"]),
                ScreenConfig::new("productos", &["nombre"]),
                ScreenConfig::new("ventas", &["cliente.nombre"])
                    .sorted("fecha:desc")
                    .paged(10, &[10, 25, 50]),
                ScreenConfig::new(
                    "movimientos_inventario",
                    &["producto.nombre", "tipo", "motivo", "referencia"],
                )
                .paged(10, &[5, 10, 25, 50]),
                ScreenConfig::new("ordenes_trabajo", &["cliente.nombre", "estado"])
                    .sorted("fecha_creacion:desc"),
                ScreenConfig::new("reporte_compradores", &["client_name"])
                    .sorted("total_purchase_amount:desc")
                    .paged(500, &[])
                    .report(5),
                ScreenConfig::new("reporte_deudores", &["client_name"])
                    .sorted("total_debt_amount:desc")
                    .paged(500, &[])
                    .report(5),
                ScreenConfig::new("reporte_productos", &["product_name"])
                    .sorted("total_revenue:desc")
                    .paged(500, &[])
                    .report(5),
            ],
        }
    }
}
