pub const DEFAULT_BAR_WIDTH: usize = 30;

/// What a data panel should render. Exactly one of the three at any time.
#[derive(Debug, PartialEq, Eq)]
pub enum FetchView<'a, T> {
    Loading,
    Failed(&'a str),
    Ready(&'a T),
}

/// Loading/data/error triple behind a fetch-on-mount panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchState<T> {
    data: T,
    loading: bool,
    error: Option<String>,
}

impl<T: Default> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: true,
            error: None,
        }
    }
}

impl<T: Default> FetchState<T> {
    /// A panel starts out loading since the first request goes out on mount.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> FetchState<T> {
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Applies a finished request. A failure keeps the previous data around but
    /// the view reports the error.
    pub fn settle<E: std::fmt::Display>(&mut self, result: Result<T, E>) {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> FetchView<'_, T> {
        if self.loading {
            FetchView::Loading
        } else if let Some(error) = &self.error {
            FetchView::Failed(error)
        } else {
            FetchView::Ready(&self.data)
        }
    }
}

/// Splits a `width`-cell bar into `(filled, empty)` cells for `percentage`.
pub fn bar_segments(percentage: u32, width: usize) -> (usize, usize) {
    let ratio = f64::from(percentage.min(100)) / 100.0;
    let filled = ((ratio * width as f64).round() as usize).min(width);
    (filled, width - filled)
}
