//! An in-process model of the page section a controller manages.
//!
//! A [PageRoot] owns two regions, the title (`.content-title`) and the content
//! list (`.content`), and dispatches delegated click events to the listeners
//! registered on it. Once detached, a root ignores all writes.

use std::sync::{Mutex, MutexGuard, PoisonError};

use maud::{Markup, PreEscaped, html};

/// The class of the region that holds the page title.
pub const TITLE_CLASS: &str = "content-title";
/// The class of the region that holds the page content.
pub const CONTENT_CLASS: &str = "content";

/// Handles a click delegated to a [PageRoot].
pub type ClickListener = Box<dyn Fn(&mut ClickEvent) + Send + Sync>;

#[derive(Debug, Default)]
struct Regions {
    /// Plain text, escaped when rendered.
    title: String,
    /// Trusted markup.
    content: String,
    detached: bool,
}

/// The root element of a page section.
#[derive(Default)]
pub struct PageRoot {
    regions: Mutex<Regions>,
    listeners: Mutex<Vec<ClickListener>>,
}

impl PageRoot {
    /// Create a root with an empty title and content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the title with the plain text `text`.
    ///
    /// Returns `false` without writing if the root has been detached.
    pub fn set_title_text(&self, text: &str) -> bool {
        let mut regions = self.regions();
        if regions.detached {
            tracing::debug!("Ignoring title write to a detached page");
            return false;
        }

        regions.title = text.to_owned();
        true
    }

    /// Replace the content with `markup`.
    ///
    /// Returns `false` without writing if the root has been detached.
    pub fn set_content(&self, markup: Markup) -> bool {
        let mut regions = self.regions();
        if regions.detached {
            tracing::debug!("Ignoring content write to a detached page");
            return false;
        }

        regions.content = markup.into_string();
        true
    }

    /// The title as plain text.
    pub fn title_text(&self) -> String {
        self.regions().title.clone()
    }

    /// The markup inside the content region.
    pub fn content_html(&self) -> String {
        self.regions().content.clone()
    }

    /// Detach the root from the page so that later writes are ignored.
    pub fn detach(&self) {
        self.regions().detached = true;
    }

    /// Whether [PageRoot::detach] has been called.
    pub fn is_detached(&self) -> bool {
        self.regions().detached
    }

    /// Register `listener` for every click inside this root.
    ///
    /// Listeners must not register further listeners while handling a click.
    pub fn add_click_listener(&self, listener: ClickListener) {
        self.listeners().push(listener);
    }

    /// The number of click listeners registered on this root.
    pub fn click_listener_count(&self) -> usize {
        self.listeners().len()
    }

    /// Deliver a click to every registered listener and return the event so
    /// the caller can check whether the default action was prevented.
    pub fn click(&self, mut event: ClickEvent) -> ClickEvent {
        for listener in self.listeners().iter() {
            listener(&mut event);
        }

        event
    }

    /// Render the whole section: header with title and account controls, then
    /// the content list.
    pub fn render(&self) -> Markup {
        let regions = self.regions();

        html! {
            section class="content-header"
            {
                h1
                {
                    span class=(TITLE_CLASS) { (regions.title) }
                }

                button class="btn btn-danger remove-account" type="button"
                {
                    i class="fa fa-trash" {}
                    " Remove account"
                }
            }

            section class=(CONTENT_CLASS)
            {
                (PreEscaped(&regions.content))
            }
        }
    }

    fn regions(&self) -> MutexGuard<'_, Regions> {
        self.regions.lock().unwrap_or_else(|error| {
            tracing::error!("page regions lock was poisoned, recovering");
            PoisonError::into_inner(error)
        })
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<ClickListener>> {
        self.listeners.lock().unwrap_or_else(|error| {
            tracing::error!("click listeners lock was poisoned, recovering");
            PoisonError::into_inner(error)
        })
    }
}

impl std::fmt::Debug for PageRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRoot")
            .field("regions", &*self.regions())
            .field("listeners", &self.click_listener_count())
            .finish()
    }
}

/// One element on the path of a click.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventTarget {
    tag: String,
    classes: Vec<String>,
    data: Vec<(String, String)>,
}

impl EventTarget {
    /// An element with the tag name `tag` and no classes or data attributes.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            ..Default::default()
        }
    }

    /// Add the class `class_name`.
    pub fn with_class(mut self, class_name: &str) -> Self {
        self.classes.push(class_name.to_owned());
        self
    }

    /// Set the data attribute `data-{key}`.
    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.data.retain(|(existing, _)| existing != key);
        self.data.push((key.to_owned(), value.to_owned()));
        self
    }

    /// The tag name of the element.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the element has the class `class_name`.
    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|class| class == class_name)
    }

    /// The value of the data attribute `data-{key}`.
    pub fn data(&self, key: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }
}

/// A click on an element inside a [PageRoot].
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// The clicked element first, followed by its ancestors up to the root.
    path: Vec<EventTarget>,
    default_prevented: bool,
}

impl ClickEvent {
    /// A click whose target is the first element of `path`, the rest being
    /// its ancestors from nearest to furthest.
    pub fn new(path: Vec<EventTarget>) -> Self {
        Self {
            path,
            default_prevented: false,
        }
    }

    /// The nearest element on the path, starting at the target, with the class `class_name`.
    pub fn closest(&self, class_name: &str) -> Option<&EventTarget> {
        self.path.iter().find(|target| target.has_class(class_name))
    }

    /// Stop the browser from following the clicked link or submitting the form.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a listener called [ClickEvent::prevent_default].
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}
