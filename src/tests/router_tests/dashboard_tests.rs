use crate::dashboard::Dashboard;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{fixture_config, get, read_body, PRICES_CSV};
use astra::Body;
use tempfile::{tempdir, TempDir};

fn full_dashboard(dir: &TempDir) -> Dashboard {
    Dashboard::build(&fixture_config(dir.path(), PRICES_CSV, true))
}

#[test]
fn root_opens_on_the_department_map() {
    let dir = tempdir().unwrap();
    let dashboard = full_dashboard(&dir);

    let resp = handle(get("/"), &dashboard).unwrap();
    assert_eq!(resp.status(), 200);
    let body = read_body(resp);

    assert!(body.contains("📈 Análisis de Precios de GNCV en Colombia"));
    assert!(body.contains("Plotly.newPlot"));
    assert!(body.contains("properties.DPTO_CNMBR"));
    assert!(body.contains("Precios de GNCV por Departamento - February 2024"));
    assert!(body.contains(r#"href="/?tab=mapa-departamentos" class="active""#));
    assert!(body.contains(r#"href="/?tab=correlacion""#));
}

#[test]
fn every_tab_is_reachable_by_slug() {
    let dir = tempdir().unwrap();
    let dashboard = full_dashboard(&dir);
    assert_eq!(dashboard.tabs().len(), 11);

    for tab in dashboard.tabs() {
        let resp = handle(get(&format!("/?tab={}", tab.slug)), &dashboard).unwrap();
        assert_eq!(resp.status(), 200, "tab {}", tab.slug);
    }
}

#[test]
fn point_map_tab_lists_last_period_municipalities() {
    let dir = tempdir().unwrap();
    let dashboard = full_dashboard(&dir);

    let body = read_body(handle(get("/?tab=mapa-municipios"), &dashboard).unwrap());
    assert!(body.contains("L.circleMarker"));
    assert!(body.contains("MANIZALES (CALDAS): $3,300"));
    assert!(body.contains("TUNJA (BOYACA): $2,800"));
    // Villavicencio has no coordinates in the last period.
    assert!(!body.contains("VILLAVICENCIO (META)"));
}

#[test]
fn correlation_tab_renders_a_heatmap() {
    let dir = tempdir().unwrap();
    let dashboard = full_dashboard(&dir);

    let body = read_body(handle(get("/?tab=correlacion"), &dashboard).unwrap());
    assert!(body.contains(r#"aria-label="Matriz de Correlación""#));
    assert!(body.contains(r#""type":"heatmap""#));
    assert!(body.contains("PRECIO_PROMEDIO_PUBLICADO"));
}

#[test]
fn unknown_tab_is_not_found() {
    let dir = tempdir().unwrap();
    let dashboard = full_dashboard(&dir);

    let result = handle(get("/?tab=inexistente"), &dashboard);
    assert!(matches!(result, Err(ServerError::NotFound)));
}

#[test]
fn unknown_path_is_not_found() {
    let dir = tempdir().unwrap();
    let dashboard = full_dashboard(&dir);

    assert!(matches!(
        handle(get("/admin"), &dashboard),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn post_to_root_is_rejected() {
    let dir = tempdir().unwrap();
    let dashboard = full_dashboard(&dir);

    let req = http::Request::builder()
        .method("POST")
        .uri("/")
        .body(Body::from(String::new()))
        .unwrap();
    assert!(matches!(
        handle(req, &dashboard),
        Err(ServerError::BadRequest(_))
    ));
}

#[test]
fn health_answers_ok() {
    let dir = tempdir().unwrap();
    let dashboard = full_dashboard(&dir);

    let resp = handle(get("/health"), &dashboard).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(read_body(resp), "ok");
}

#[test]
fn missing_shapefile_serves_statistics_only() {
    let dir = tempdir().unwrap();
    let dashboard = Dashboard::build(&fixture_config(dir.path(), PRICES_CSV, false));
    assert_eq!(dashboard.tabs().len(), 8);

    let body = read_body(handle(get("/"), &dashboard).unwrap());
    assert!(body.contains(r#"href="/?tab=histograma" class="active""#));
    assert!(!body.contains("mapa-departamentos"));
    assert!(matches!(
        handle(get("/?tab=variacion"), &dashboard),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn corrupt_shapefile_only_disables_the_maps() {
    let dir = tempdir().unwrap();
    let cfg = fixture_config(dir.path(), PRICES_CSV, true);
    let shp = cfg.shapefile_override.clone().unwrap();

    let mut bytes = std::fs::read(&shp).unwrap();
    bytes[100 + 8 + 36..100 + 8 + 40].copy_from_slice(&i32::MAX.to_le_bytes());
    std::fs::write(&shp, bytes).unwrap();

    let dashboard = Dashboard::build(&cfg);
    assert_eq!(dashboard.tabs().len(), 8);
    assert!(dashboard.artifacts()[0].outcome.is_ok());
    assert!(dashboard.artifacts()[1].outcome.is_err());

    let body = read_body(handle(get("/"), &dashboard).unwrap());
    assert!(body.contains(r#"href="/?tab=histograma" class="active""#));
}
