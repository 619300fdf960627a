use crate::dashboard::ArtifactStatus;
use crate::templates::{card, desktop_layout};
use maud::{html, Markup};

/// Shown instead of the tabs when neither input could be used.
pub fn diagnostic_page(artifacts: &[ArtifactStatus]) -> Markup {
    desktop_layout(
        "Dashboard GNCV",
        false,
        html! {
            h1 class="error" { "Error al cargar el Dashboard" }
            p style="text-align: center" {
                "No se pudieron cargar los datos necesarios. Verifica que los archivos estén en las rutas correctas."
            }
            (card("Estado de los archivos", html! {
                ul {
                    @for status in artifacts {
                        li {
                            strong { (status.artifact) } ": "
                            @match &status.outcome {
                                Ok(summary) => span class="status-ok" { "cargado (" (summary) ")" },
                                Err(reason) => span class="status-failed" { "no disponible: " (reason) },
                            }
                        }
                    }
                }
            }))
        },
    )
}
