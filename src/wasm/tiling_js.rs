use crate::coords::PoincareDiskPoint;
use crate::errors::HyperbolicError;
use crate::float_types::Real;
use crate::tiling::Tiling;
use crate::view::{TileView, ViewOptions, Viewer, Viewpoint, project};
use wasm_bindgen::prelude::*;

fn to_js(error: HyperbolicError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// A tiling together with its viewer state. The front end moves the
/// viewpoint with `lookAt`/`commit` and reads back one path string and one
/// opacity per tile.
#[wasm_bindgen]
pub struct TilingJs {
    inner: Tiling,
    viewer: Viewer,
    viewpoint: Viewpoint,
    options: ViewOptions,
    views: Vec<TileView>,
    scale: Real,
}

impl TilingJs {
    fn refresh(&mut self) -> Result<(), JsValue> {
        self.views = project(&self.inner, &self.viewpoint, &self.options).map_err(to_js)?;
        Ok(())
    }
}

#[wasm_bindgen]
impl TilingJs {
    #[wasm_bindgen(constructor)]
    pub fn new(p: u32, q: u32, level: u32) -> Result<TilingJs, JsValue> {
        let mut inner = Tiling::new(p as usize, q as usize).map_err(to_js)?;
        inner.set_level(level as usize).map_err(to_js)?;
        let mut tiling = TilingJs {
            inner,
            viewer: Viewer::new(),
            viewpoint: Viewpoint::default(),
            options: ViewOptions::default(),
            views: Vec::new(),
            scale: 100.0,
        };
        tiling.refresh()?;
        Ok(tiling)
    }

    #[wasm_bindgen(getter)]
    pub fn level(&self) -> u32 {
        self.inner.level() as u32
    }

    #[wasm_bindgen(js_name = tileCount)]
    pub fn tile_count(&self) -> u32 {
        self.inner.tiles().len() as u32
    }

    #[wasm_bindgen(js_name = setLevel)]
    pub fn set_level(&mut self, level: u32) -> Result<(), JsValue> {
        self.inner.set_level(level as usize).map_err(to_js)?;
        self.refresh()
    }

    #[wasm_bindgen(js_name = setThresholds)]
    pub fn set_thresholds(&mut self, render: f64, blur: f64) -> Result<(), JsValue> {
        self.options = ViewOptions::default()
            .with_render_threshold(render as Real)
            .with_blur_threshold(blur as Real);
        self.refresh()
    }

    /// Look at the view-space point `(d, angle)` without committing to it.
    #[wasm_bindgen(js_name = lookAt)]
    pub fn look_at(&mut self, d: f64, angle: f64) -> Result<(), JsValue> {
        let point = PoincareDiskPoint::new(d as Real, angle as Real);
        self.viewpoint = self.viewer.look_at(&point).map_err(to_js)?;
        self.refresh()
    }

    pub fn commit(&mut self, d: f64, angle: f64) -> Result<(), JsValue> {
        let point = PoincareDiskPoint::new(d as Real, angle as Real);
        self.viewer.commit(&point).map_err(to_js)?;
        self.viewpoint = self.viewer.viewpoint();
        self.refresh()
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.viewer.reset();
        self.viewpoint = self.viewer.viewpoint();
        self.refresh()
    }

    /// SVG `d` attribute of a tile, `undefined` when the tile is hidden.
    pub fn path(&self, index: u32) -> Option<String> {
        let view = self.views.get(index as usize)?;
        let path = view.path.as_ref()?;
        #[cfg(feature = "svg-io")]
        {
            Some(path.path_data_string(self.scale))
        }
        #[cfg(not(feature = "svg-io"))]
        {
            let _ = (path, self.scale);
            None
        }
    }

    pub fn opacities(&self) -> Vec<f64> {
        self.views.iter().map(|view| view.opacity as f64).collect()
    }
}
