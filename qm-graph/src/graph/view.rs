use super::{
    error::ViewportError,
    opts::PlotOptions,
    point::CanvasPoint,
    viewport::{Drag, Viewport},
    PlotKind,
};

/// The viewport of an interactive plot, and the gestures that move it.
///
/// For 2D plots, the y-span is locked to the canvas aspect ratio after every change, so that
/// circles look like circles. Line plots keep whatever y-span they are given.
#[derive(Clone, Debug)]
pub struct View {
    /// The current viewport.
    viewport: Viewport,

    /// The kind of plot being shown.
    kind: PlotKind,

    /// The options of the plot.
    options: PlotOptions,

    /// The pan gesture in progress, if any.
    drag: Option<Drag>,
}

impl View {
    /// Creates a view of the default viewport.
    pub fn new(kind: PlotKind, options: PlotOptions) -> View {
        let mut view = View {
            viewport: Viewport::default(),
            kind,
            options,
            drag: None,
        };
        view.lock_aspect();
        view
    }

    /// Returns the current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Returns the kind of plot being shown.
    pub fn kind(&self) -> PlotKind {
        self.kind
    }

    /// Returns the options of the plot.
    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    /// Returns true if a pan gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Re-locks the aspect ratio, if the plot is 2D.
    fn lock_aspect(&mut self) {
        if self.kind.is_2d() {
            self.viewport = self.viewport.lock_aspect(
                self.options.aspect_ratio(),
                self.options.aspect_tolerance,
            );
        }
    }

    /// Changes the kind of plot being shown, such as when the user edits the input.
    pub fn set_kind(&mut self, kind: PlotKind) {
        self.kind = kind;
        self.lock_aspect();
    }

    /// Replaces the viewport, such as when the user types in new bounds.
    ///
    /// Invalid bounds are rejected and leave the view unchanged.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<(), ViewportError> {
        viewport.validate()?;
        self.viewport = viewport;
        self.lock_aspect();
        Ok(())
    }

    /// Zooms in response to a wheel event at the given pointer position. A positive `delta_y`
    /// (scrolling down) zooms out.
    pub fn zoom(&mut self, delta_y: f64, pointer: CanvasPoint<f64>) {
        let scale = if delta_y > 0.0 { self.options.zoom_out } else { self.options.zoom_in };
        self.viewport = self.viewport.zoom_at_canvas(scale, pointer, self.options.canvas_size);
        self.lock_aspect();
    }

    /// Begins a pan gesture at the given pointer position.
    pub fn begin_drag(&mut self, pointer: CanvasPoint<f64>) {
        self.drag = Some(Drag::new(self.viewport, pointer));
    }

    /// Moves the pan gesture in progress to the given pointer position. Does nothing if no
    /// gesture is in progress.
    pub fn drag_to(&mut self, pointer: CanvasPoint<f64>) {
        if let Some(drag) = &self.drag {
            self.viewport = drag.update(pointer, self.options.canvas_size);
            self.lock_aspect();
        }
    }

    /// Ends the pan gesture in progress.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Returns to the default viewport.
    pub fn reset(&mut self) {
        self.drag = None;
        self.viewport = self.viewport.reset();
        self.lock_aspect();
    }
}
