//! List screen walkthrough
//!
//! This example demonstrates:
//! - Loading the screen configuration (defaults merged with a YAML file)
//! - Searching, sorting and paging a collection of sales
//! - The header-click sort convention
//! - Report previews and currency formatting
//!
//! Run with `RUST_LOG=gestor=trace cargo run --example list_screen` to see
//! the pipeline events.

use gestor::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

const OVERRIDES: &str = r#"
screens:
  - name: ventas
    search_fields: [cliente.nombre, estado]
    default_sort: fecha:desc
    page_size: 3
    page_size_options: [3, 10, 25]
"#;

fn sample_sales() -> Vec<Value> {
    vec![
        json!({"id": 101, "fecha": "2024-03-01T09:15:00", "cliente": {"nombre": "Ana Gómez"}, "estado": "pagada", "total": 185000}),
        json!({"id": 102, "fecha": "2024-03-02T11:40:00", "cliente": {"nombre": "Beto Ruiz"}, "estado": "pendiente", "total": 42500}),
        json!({"id": 103, "fecha": "2024-03-02T16:05:00", "cliente": {"nombre": "Ana Gómez"}, "estado": "pendiente", "total": 1250000}),
        json!({"id": 104, "fecha": "2024-03-04T08:00:00", "cliente": null, "estado": "pagada", "total": 9900}),
        json!({"id": 105, "fecha": "2024-03-05T14:30:00", "cliente": {"nombre": "Carla Díaz"}, "estado": "pagada", "total": 310000}),
        json!({"id": 106, "fecha": "2024-03-06T10:10:00", "cliente": {"nombre": "Beto Ruiz"}, "estado": "pagada", "total": 75000}),
    ]
}

fn print_page(title: &str, page: &Page<&Value>) {
    println!("{title}");
    for row in &page.rows {
        let cliente = resolve_path(*row, "cliente.nombre")
            .and_then(Value::as_str)
            .unwrap_or("(sin cliente)");
        let fecha = row["fecha"]
            .as_str()
            .and_then(parse_backend_timestamp)
            .map(|dt| format_timestamp(&dt))
            .unwrap_or_default();
        let total = row["total"].as_f64().unwrap_or_default();
        println!(
            "   #{} {fecha} {cliente:<14} {:>14}",
            row["id"],
            format_currency(total)
        );
    }
    println!(
        "   {} (page {}/{})\n",
        page.pagination.label(),
        page.pagination.page_index + 1,
        page.pagination.total_pages.max(1)
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Gestor list screen example");
    println!("==========================\n");

    // Load configuration
    let file = tempfile::NamedTempFile::new()?;
    std::fs::write(file.path(), OVERRIDES)?;
    let config = ScreensConfig::merge(vec![
        ScreensConfig::default_config(),
        ScreensConfig::from_yaml_file(file.path())?,
    ]);
    config.validate()?;
    println!("Loaded {} screens\n", config.screens.len());

    let sales = sample_sales();
    let mut view = config.screen("ventas")?.list_view();

    print_page("Newest sales:", &view.apply(&sales));

    view.set_page(1);
    print_page("Next page:", &view.apply(&sales));

    view.set_query("ana");
    print_page("Search \"ana\":", &view.apply(&sales));

    view.set_query("");
    view.request_sort("total");
    print_page("Sorted by total (ascending):", &view.apply(&sales));

    view.request_sort("total");
    print_page("Sorted by total (descending):", &view.apply(&sales));

    // Report preview: top buyers, five rows before "show all"
    let report = config.screen("reporte_compradores")?;
    let buyers = vec![
        json!({"client_id": 1, "client_name": "Ana Gómez", "total_purchase_amount": 1435000}),
        json!({"client_id": 2, "client_name": "Beto Ruiz", "total_purchase_amount": 117500}),
        json!({"client_id": 3, "client_name": "Carla Díaz", "total_purchase_amount": 310000}),
    ];
    let page = report.list_view().apply(&buyers);
    println!("Top buyers:");
    for row in top_n(&page.rows, report.preview_rows) {
        let amount = row["total_purchase_amount"].as_f64().unwrap_or_default();
        println!(
            "   {:<14} {:>14}",
            row["client_name"].as_str().unwrap_or_default(),
            format_currency(amount)
        );
    }

    Ok(())
}
