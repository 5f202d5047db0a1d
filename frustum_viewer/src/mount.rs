/// Host mount adapter - attaches the drawing surface to a host container.

use crate::error::Result;
use crate::{engine_bail, engine_debug};

/// A host able to display one drawing surface at a time.
pub trait SurfaceContainer {
    type Surface;

    /// Take ownership of `surface` and show it.
    fn attach(&mut self, surface: Self::Surface) -> Result<()>;

    /// Hide the current surface and hand it back.
    fn detach(&mut self) -> Option<Self::Surface>;
}

/// Tracks whether the viewer surface is mounted in a container.
#[derive(Debug, Default)]
pub struct MountAdapter {
    mounted: bool,
}

impl MountAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mount<C: SurfaceContainer>(&mut self, container: &mut C, surface: C::Surface) -> Result<()> {
        if self.mounted {
            engine_bail!(InvalidState, "fviewer::MountAdapter", "surface is already mounted");
        }
        container.attach(surface)?;
        self.mounted = true;
        engine_debug!("fviewer::MountAdapter", "Surface mounted");
        Ok(())
    }

    /// Detach the surface. Returns `None` if nothing was mounted.
    pub fn unmount<C: SurfaceContainer>(&mut self, container: &mut C) -> Option<C::Surface> {
        if !self.mounted {
            return None;
        }
        self.mounted = false;
        let surface = container.detach();
        engine_debug!("fviewer::MountAdapter", "Surface unmounted");
        surface
    }
}
