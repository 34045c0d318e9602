//! Configuration types for HTML rendering.

/// Configuration options for HTML rendering.
///
/// # Examples
///
/// ```rust
/// use pitaya::html::HtmlOptions;
///
/// // Create with defaults
/// let options = HtmlOptions::default();
///
/// // Or customize
/// let options = HtmlOptions::new()
///     .with_slide_class("deck-slide")
///     .with_icon_size(32)
///     .with_parallel(false);
/// ```
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Class set on each slide's wrapper container
    pub slide_class: String,
    /// Default pixel size for icons without an explicit `data-size`
    pub icon_size: u32,
    /// Whether large documents may render slides in parallel
    pub use_parallel: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            slide_class: "slide".to_string(),
            icon_size: 24,
            use_parallel: true,
        }
    }
}

impl HtmlOptions {
    /// Create a new `HtmlOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wrapper class for slide containers.
    pub fn with_slide_class(mut self, class: impl Into<String>) -> Self {
        self.slide_class = class.into();
        self
    }

    /// Set the default icon size in pixels.
    pub fn with_icon_size(mut self, size: u32) -> Self {
        self.icon_size = size;
        self
    }

    /// Enable or disable parallel slide rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.use_parallel = parallel;
        self
    }
}
