//! Three-phase page assembly.
//!
//! [`PageAssembler::load_page`] runs the phases strictly in order:
//!
//! 1. **Eager**: language, theme, preconnect hints, section and block
//!    marking, then the first section is decorated and the assembler waits
//!    for its first image to load or fail.
//! 2. **Lazy**: the remaining sections, section backgrounds, the hash scroll
//!    target, header and footer fragments, non-critical stylesheets.
//! 3. **Delayed**: armed once Lazy is done and run after a fixed delay
//!    (placeholders and the analytics data layer).
//!
//! Every step catches its own failure; a page is never abandoned.

use std::time::Duration;

use bw_blocks::{BLOCK_STATUS_ATTR, BlockRegistry, DecorateContext, Viewport, block_name};
use bw_config::{Config, PageConfig, SiteConfig, ThemeConfig};
use bw_dom::{Document, NodeId};
use bw_fetch::{Fetcher, ImageLoad, ResourceLoader};
use bw_theme::{ThemeRequest, ThemeResolver};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

use crate::data_layer::{PageInfo, render_data_layer};
use crate::error::PageError;
use crate::fragments::{Fragment, fragment_document};
use crate::head::{add_preconnect, load_css};
use crate::metadata::{decorate_template_and_theme, language_from_path, metadata, set_page_language};
use crate::phase::{DelayedTask, PageReport, Phase, PhaseEvent, TimedEvent};
use crate::placeholders::fetch_placeholders;
use crate::section_images::decorate_section_images;
use crate::sections::{
    SectionStatus, decorate_blocks, decorate_icons, decorate_sections, section_status, sections,
    set_section_status,
};

/// Settings the assembler reads from [`Config`].
#[derive(Clone, Debug, Default)]
pub struct PageSettings {
    pub site: SiteConfig,
    pub theme: ThemeConfig,
    pub page: PageConfig,
}

impl From<&Config> for PageSettings {
    fn from(config: &Config) -> Self {
        Self {
            site: config.site.clone(),
            theme: config.theme.clone(),
            page: config.page.clone(),
        }
    }
}

impl PageSettings {
    fn code_path(&self, path: &str) -> String {
        format!("{}{path}", self.site.code_base_path.trim_end_matches('/'))
    }
}

/// Per-page state carried across phases.
#[derive(Debug)]
pub struct PageState {
    url: Url,
    ctx: DecorateContext,
    report: PageReport,
    started: Instant,
}

impl PageState {
    #[must_use]
    pub fn new(url: Url, settings: &PageSettings) -> Self {
        let ctx = DecorateContext::new(url.clone())
            .with_viewport(Viewport::new(settings.page.viewport_width))
            .with_author_mode(settings.site.author_mode);
        Self {
            url,
            ctx,
            report: PageReport::default(),
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub fn context(&self) -> &DecorateContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut DecorateContext {
        &mut self.ctx
    }

    #[must_use]
    pub fn report(&self) -> &PageReport {
        &self.report
    }

    #[must_use]
    pub fn into_report(self) -> PageReport {
        self.report
    }

    fn record(&mut self, event: PhaseEvent) {
        debug!(?event, "Page event");
        self.report.events.push(TimedEvent {
            elapsed: self.started.elapsed(),
            event,
        });
    }

    fn step<T>(
        &mut self,
        phase: Phase,
        step: &'static str,
        result: Result<T, PageError>,
    ) -> Option<T> {
        result.map_err(|e| self.fail(phase, step, &e)).ok()
    }

    fn fail(&mut self, phase: Phase, step: &'static str, error: &PageError) {
        warn!(%phase, step, error = %error, "Page step failed");
        self.record(PhaseEvent::StepFailed {
            phase,
            step,
            error: error.to_string(),
        });
    }
}

/// Assembles authored pages into decorated documents.
#[derive(Debug)]
pub struct PageAssembler<F, R> {
    fetcher: F,
    resources: R,
    registry: BlockRegistry,
    settings: PageSettings,
}

impl<F: Fetcher, R: ResourceLoader> PageAssembler<F, R> {
    pub fn new(fetcher: F, resources: R, settings: PageSettings) -> Self {
        Self {
            fetcher,
            resources,
            registry: BlockRegistry::with_defaults(),
            settings,
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: BlockRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    /// Run all three phases on `doc`, the page at `url`.
    pub async fn load_page(&self, doc: &mut Document, url: Url) -> PageReport {
        let mut state = PageState::new(url, &self.settings);
        self.load_eager(doc, &mut state).await;
        self.load_lazy(doc, &mut state).await;

        let delayed = DelayedTask::schedule(Duration::from_millis(self.settings.page.delayed_ms));
        state.record(PhaseEvent::DelayedScheduled {
            delay: delayed.delay(),
        });
        delayed.wait().await;
        self.load_delayed(doc, &mut state).await;

        info!(
            url = %state.url,
            events = state.report.events.len(),
            failed = state.report.failed_steps().len(),
            "Page assembled"
        );
        state.into_report()
    }

    /// Everything needed for the first paint.
    pub async fn load_eager(&self, doc: &mut Document, state: &mut PageState) {
        state.record(PhaseEvent::PhaseStarted(Phase::Eager));

        let language = language_from_path(state.url.path(), &self.settings.site.default_language);
        set_page_language(doc, &language);
        state.report.language = language;

        self.apply_theme(doc, state).await;
        self.add_preconnects(doc, state);
        decorate_template_and_theme(doc);

        match doc.main() {
            Some(main) => {
                decorate_icons(doc, main, &self.settings.site.code_base_path);
                decorate_sections(doc, main);
                decorate_blocks(doc, main);
                if let Some(body) = doc.body() {
                    doc.add_class(body, "appear");
                }
                if let Some(first) = sections(doc, main).first().copied() {
                    self.load_section(doc, state, first, Phase::Eager).await;
                }
            }
            None => {
                state.fail(Phase::Eager, "main", &PageError::MissingElement("main"));
            }
        }

        if self.settings.page.viewport_width >= self.settings.page.eager_fonts_min_width {
            self.add_stylesheet(doc, state, "/styles/fonts.css");
        }
        state.record(PhaseEvent::PhaseFinished(Phase::Eager));
    }

    /// Remaining sections and everything below the fold.
    pub async fn load_lazy(&self, doc: &mut Document, state: &mut PageState) {
        state.record(PhaseEvent::PhaseStarted(Phase::Lazy));

        if let Some(main) = doc.main() {
            for section in sections(doc, main) {
                self.load_section(doc, state, section, Phase::Lazy).await;
            }
            let count = decorate_section_images(doc, main, &state.url);
            if count > 0 {
                state.record(PhaseEvent::SectionImages { count });
            }
        }

        let target = state
            .url
            .fragment()
            .filter(|id| !id.is_empty() && doc.get_element_by_id(id).is_some())
            .map(str::to_owned);
        if let Some(id) = target {
            state.record(PhaseEvent::ScrollTarget { id });
        }

        self.load_fragment(doc, state, Fragment::Header).await;
        self.load_fragment(doc, state, Fragment::Footer).await;

        self.add_stylesheet(doc, state, "/styles/lazy-styles.css");
        self.add_stylesheet(doc, state, "/styles/fonts.css");
        state.record(PhaseEvent::PhaseFinished(Phase::Lazy));
    }

    /// Work with no user-visible urgency.
    pub async fn load_delayed(&self, doc: &mut Document, state: &mut PageState) {
        state.record(PhaseEvent::PhaseStarted(Phase::Delayed));

        let placeholders = fetch_placeholders(
            &self.fetcher,
            &state.report.language,
            &self.settings.site.default_language,
            &self.settings.page.placeholders,
        )
        .await;
        let info = PageInfo::from_document(doc, &placeholders);
        state.report.placeholders = placeholders;
        if state
            .step(Phase::Delayed, "data-layer", render_data_layer(doc, &info))
            .is_some()
        {
            state.record(PhaseEvent::DataLayerRendered);
        }

        state.record(PhaseEvent::PhaseFinished(Phase::Delayed));
    }

    async fn apply_theme(&self, doc: &mut Document, state: &mut PageState) {
        let resolver = ThemeResolver::new(&self.fetcher, self.settings.theme.clone());
        let explicit = metadata(doc, resolver.meta_name())
            .and_then(|m| state.url.join(m.trim()).ok())
            .map(|u| u.path().to_owned());
        let path = state.url.path().to_owned();
        let request = ThemeRequest::new(&path, &state.report.language)
            .with_explicit(explicit.as_deref());

        match resolver.apply(doc, &request).await {
            Some(theme) => {
                state.record(PhaseEvent::ThemeApplied {
                    path: theme.path.clone(),
                    source: theme.source,
                });
                state.report.theme = Some(theme);
            }
            None => state.record(PhaseEvent::ThemeSkipped),
        }
    }

    fn add_preconnects(&self, doc: &mut Document, state: &PageState) {
        add_preconnect(doc, &state.url.origin().ascii_serialization());
        let image_origin = doc
            .main()
            .and_then(|main| doc.find(main, |e| e.is("img")))
            .and_then(|img| doc.attr(img, "src"))
            .and_then(|src| state.url.join(src).ok())
            .map(|u| u.origin().ascii_serialization());
        if let Some(origin) = image_origin {
            add_preconnect(doc, &origin);
        }
    }

    /// Decorate the blocks of one section and reveal it.
    ///
    /// In the eager phase the first image of the section is awaited before the
    /// section counts as loaded. Sections already loading or loaded are
    /// skipped.
    async fn load_section(
        &self,
        doc: &mut Document,
        state: &mut PageState,
        section: NodeId,
        phase: Phase,
    ) {
        if matches!(
            section_status(doc, section),
            Some(SectionStatus::Loading | SectionStatus::Loaded)
        ) {
            return;
        }
        set_section_status(doc, section, SectionStatus::Loading);

        self.decorate_blocks_in(doc, state, section, phase);

        if phase == Phase::Eager {
            self.wait_for_first_image(doc, state, section).await;
        }

        set_section_status(doc, section, SectionStatus::Loaded);
        doc.show(section);
        state.record(PhaseEvent::SectionLoaded { phase });
    }

    fn decorate_blocks_in(
        &self,
        doc: &mut Document,
        state: &mut PageState,
        scope: NodeId,
        phase: Phase,
    ) {
        let blocks = doc.find_all(scope, |e| {
            e.has_class("block") && e.attr(BLOCK_STATUS_ATTR) == Some("initialized")
        });
        for block in blocks {
            // Decorating an earlier block may have moved this one elsewhere.
            if !doc.contains(scope, block) {
                continue;
            }
            let name = block_name(doc, block).unwrap_or_default();
            let outcome = self.registry.decorate(doc, block, &mut state.ctx);
            state.record(PhaseEvent::BlockDecorated {
                phase,
                name,
                outcome,
            });
        }
    }

    async fn wait_for_first_image(
        &self,
        doc: &mut Document,
        state: &mut PageState,
        section: NodeId,
    ) {
        let Some(img) = doc.find(section, |e| e.is("img")) else {
            return;
        };
        doc.set_attr(img, "loading", "eager");
        let src = doc.attr(img, "src").unwrap_or_default().to_owned();
        let outcome = if src.is_empty() {
            ImageLoad::Skipped
        } else {
            self.resources.load_image(&src).await
        };
        debug!(src = %src, ?outcome, "First image settled");
        state.record(PhaseEvent::FirstImageSettled { src, outcome });
    }

    async fn load_fragment(&self, doc: &mut Document, state: &mut PageState, fragment: Fragment) {
        let Some(container) = fragment.container(doc) else {
            return;
        };
        if fragment.mounted(doc, container).is_some() {
            return;
        }
        let path = fragment.path(doc, &state.url, &self.settings.page);
        let fetched = self
            .fetcher
            .fetch(&fragment_document(&path))
            .await
            .map_err(PageError::from);
        let Some(html) = state.step(Phase::Lazy, fragment.name(), fetched) else {
            return;
        };

        let block = fragment.mount(doc, container, &html);
        for section in doc.find_all(block, |e| e.has_class("section")) {
            self.load_section(doc, state, section, Phase::Lazy).await;
        }
        doc.set_attr(block, BLOCK_STATUS_ATTR, "loaded");
        state.record(PhaseEvent::FragmentLoaded {
            name: fragment.name(),
            path,
        });
    }

    fn add_stylesheet(&self, doc: &mut Document, state: &mut PageState, path: &str) {
        let href = self.settings.code_path(path);
        if load_css(doc, &href) {
            state.record(PhaseEvent::StylesheetAdded { href });
        }
    }
}
