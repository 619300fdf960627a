use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::errors::ServerError;
use crate::router::handle;
use crate::templates::html_error_response;
use crate::tests::utils::{fixture_config, get, read_body};
use tempfile::tempdir;

#[test]
fn missing_csv_shows_the_diagnostic_page() {
    let dir = tempdir().unwrap();
    let cfg = DashboardConfig {
        csv_path: dir.path().join("no_existe.csv"),
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::build(&cfg);

    let resp = handle(get("/"), &dashboard).unwrap();
    assert_eq!(resp.status(), 200);
    let body = read_body(resp);

    assert!(body.contains("Error al cargar el Dashboard"));
    assert!(body.contains("Datos de precios (CSV)"));
    assert!(body.contains("Mapa de departamentos (shapefile)"));
    assert!(body.contains("no_existe.csv"));
    assert!(!body.contains("Plotly.newPlot"));
}

#[test]
fn diagnostic_page_ignores_tab_selection() {
    let dir = tempdir().unwrap();
    let cfg = DashboardConfig {
        csv_path: dir.path().join("no_existe.csv"),
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::build(&cfg);

    let body = read_body(handle(get("/?tab=histograma"), &dashboard).unwrap());
    assert!(body.contains("Error al cargar el Dashboard"));
}

#[test]
fn malformed_csv_names_the_missing_column() {
    let dir = tempdir().unwrap();
    let csv = "DEPARTAMENTO_EDS,MUNICIPIO_EDS,FECHA_PRECIO\nCaldas,MANIZALES,2024-01-01\n";
    let dashboard = Dashboard::build(&fixture_config(dir.path(), csv, true));

    assert!(!dashboard.has_tabs());
    let body = read_body(handle(get("/"), &dashboard).unwrap());
    assert!(body.contains("no disponible"));
    assert!(body.contains("PRECIO_PROMEDIO_PUBLICADO"));
}

#[test]
fn error_pages_carry_status_and_escape_messages() {
    let resp = html_error_response(ServerError::NotFound);
    assert_eq!(resp.status(), 404);

    let resp = html_error_response(ServerError::BadRequest("<b>method</b>".into()));
    assert_eq!(resp.status(), 400);
    let body = read_body(resp);
    assert!(body.contains("&lt;b&gt;method&lt;/b&gt;"));
    assert!(!body.contains("<b>method</b>"));
}
