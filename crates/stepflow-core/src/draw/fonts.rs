//! Process-wide fonts shared by text measurement and rasterization.
//!
//! System fonts are discovered once, by cosmic-text. The rasterizer gets a
//! copy of the same face database, so a label is wrapped against the faces
//! it is later drawn with.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use cosmic_text::FontSystem;
use log::info;
use usvg::fontdb;

struct SharedFonts {
    system: Mutex<FontSystem>,
    database: Arc<fontdb::Database>,
}

static FONTS: OnceLock<SharedFonts> = OnceLock::new();

fn shared() -> &'static SharedFonts {
    FONTS.get_or_init(|| {
        info!("Initializing FontSystem");
        let system = FontSystem::new();
        let database = Arc::new(system.db().clone());
        info!(faces = database.len(); "Loaded system fonts");
        SharedFonts {
            system: Mutex::new(system),
            database,
        }
    })
}

/// Locks the shaping `FontSystem`.
///
/// Shaping never leaves the `FontSystem` half-updated, so a poisoned lock is
/// still usable.
pub(crate) fn font_system() -> MutexGuard<'static, FontSystem> {
    shared()
        .system
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Returns the face database handed to the rasterizer.
pub(crate) fn font_database() -> Arc<fontdb::Database> {
    Arc::clone(&shared().database)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterizer_sees_the_measured_faces() {
        let database = font_database();
        let system = font_system();
        assert_eq!(database.len(), system.db().len());

        let measured: Vec<_> = system.db().faces().map(|face| face.id).collect();
        let drawn: Vec<_> = database.faces().map(|face| face.id).collect();
        assert_eq!(measured, drawn);
    }
}
