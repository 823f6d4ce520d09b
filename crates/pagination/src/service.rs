use std::sync::Arc;

use once_cell::unsync::OnceCell;
use serde::Serialize;

use alpha_pagination_alphabet::AlphabetProvider;
use alpha_pagination_cache::{self as cache, cache_id, content_hash, CacheBackend};
use alpha_pagination_protocol::{
    HandlerRef, NumericMode, PaginationOptions, Value, ViewRegistry, ViewState,
};
use alpha_pagination_query::{normalize_rendered, render_query, Database, PrefixDiscovery};

use crate::builder::Layout;
use crate::character::Character;
use crate::error::{PaginationError, Result};
use crate::link::{
    internal_href, parse_attributes, replace_tokens, view_url, Attributes, Link, TokenData,
};
use crate::render::{ItemContent, PaginationItem, PaginationList};
use crate::set::CharacterSet;
use crate::validate::validate_display;

const CACHE_PREFIX: &str = "alpha_pagination";

/// Long-lived collaborators shared by every request.
#[derive(Clone)]
pub struct Services<'a> {
    pub alphabets: Arc<AlphabetProvider>,
    pub cache: Arc<dyn CacheBackend>,
    pub db: &'a dyn Database,
}

#[derive(Serialize)]
struct CacheKey<'k> {
    langcode: &'k str,
    view: &'k str,
    display: &'k str,
    query: String,
    options: &'k PaginationOptions,
}

/// The pagination index of one view display, for one request.
///
/// Characters are computed once per instance and shared across requests
/// through the cache backend; only the active flag is request specific.
pub struct AlphaPagination<'a> {
    handler: HandlerRef,
    view: ViewState,
    options: PaginationOptions,
    services: Services<'a>,
    characters: OnceCell<CharacterSet>,
    url: OnceCell<String>,
}

impl<'a> AlphaPagination<'a> {
    /// Bind a handler to the view state of the current request.
    ///
    /// Options come from the handler when it is a pagination area, otherwise
    /// from the display's first pagination area.
    pub fn new(view: ViewState, handler: HandlerRef, services: Services<'a>) -> Self {
        let options = view
            .handler(handler.handler_type, &handler.field_id)
            .filter(|config| config.is_pagination_area())
            .or_else(|| view.area_handlers().first().copied())
            .map(|config| config.options.clone())
            .unwrap_or_default();

        Self {
            handler,
            view,
            options,
            services,
            characters: OnceCell::new(),
            url: OnceCell::new(),
        }
    }

    /// Look the handler's view up again and bind to it.
    pub fn resolve(
        handler: HandlerRef,
        registry: &dyn ViewRegistry,
        services: Services<'a>,
    ) -> Result<Self> {
        let view = registry
            .load(&handler.view_id, &handler.display_id)
            .ok_or_else(|| PaginationError::ViewNotFound(handler.to_string()))?;
        Ok(Self::new(view, handler, services))
    }

    pub fn with_options(mut self, options: PaginationOptions) -> Self {
        self.options = options;
        self.characters = OnceCell::new();
        self.url = OnceCell::new();
        self
    }

    pub fn handler(&self) -> &HandlerRef {
        &self.handler
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    pub fn ui_name(&self) -> &str {
        self.options.ui_name()
    }

    fn langcode(&self) -> Option<&str> {
        Some(self.handler.langcode.as_str()).filter(|code| !code.is_empty())
    }

    pub fn alphabet(&self) -> Result<Vec<String>> {
        Ok(self.services.alphabets.alphabet(self.langcode())?)
    }

    pub fn numbers(&self) -> Result<Vec<String>> {
        Ok(self.services.alphabets.numbers(self.langcode())?)
    }

    pub fn is_numeric(&self, value: &str) -> Result<bool> {
        let numbers = self.numbers()?;
        Ok(Layout {
            options: &self.options,
            alphabet: &[],
            numbers: &numbers,
        }
        .is_numeric(value))
    }

    /// Cache id of this display's character set.
    ///
    /// Covers the language, the display, a hash of the normalized listing
    /// query and every option.
    pub fn cid(&self) -> Result<String> {
        let query = self
            .view
            .build_info
            .as_ref()
            .filter(|query| !query.is_empty())
            .map(|query| content_hash(&normalize_rendered(&render_query(query))))
            .unwrap_or_default();
        let langcode = self
            .langcode()
            .unwrap_or_else(|| self.services.alphabets.default_langcode());

        let key = CacheKey {
            langcode,
            view: &self.view.view_id,
            display: &self.view.display_id,
            query,
            options: &self.options,
        };
        Ok(cache_id(CACHE_PREFIX, &key)?)
    }

    /// Drop the cached character set, e.g. after the options changed.
    pub fn invalidate(&mut self) -> Result<()> {
        let cid = self.cid()?;
        log::debug!("Invalidating alpha pagination cache {cid}");
        self.services.cache.invalidate(&cid)?;
        self.characters.take();
        self.url.take();
        Ok(())
    }

    fn discovery(&self) -> Result<PrefixDiscovery<'_, dyn Database + 'a>> {
        let selector = self.options.field_selector()?;
        Ok(PrefixDiscovery::new(self.services.db, &self.view, selector))
    }

    pub fn entity_ids(&self) -> Result<Vec<Value>> {
        Ok(self.discovery()?.entity_ids()?)
    }

    pub fn entity_prefixes(&self) -> Result<Vec<String>> {
        Ok(self.discovery()?.entity_prefixes()?)
    }

    /// The ordered index, with the request's character marked active.
    pub fn characters(&self) -> Result<&CharacterSet> {
        self.characters.get_or_try_init(|| self.load_characters())
    }

    fn load_characters(&self) -> Result<CharacterSet> {
        let alphabet = self.alphabet()?;
        let numbers = self.numbers()?;
        let layout = Layout {
            options: &self.options,
            alphabet: &alphabet,
            numbers: &numbers,
        };

        let cid = self.cid()?;
        let backend = self.services.cache.as_ref();
        let cached = cache::load::<CharacterSet>(backend, &cid)?.filter(|set| !set.is_empty());
        let mut set = match cached {
            Some(set) => set,
            None => {
                let prefixes = self.entity_prefixes()?;
                log::debug!(
                    "Building alpha pagination for {}:{} from {} prefixes",
                    self.view.view_id,
                    self.view.display_id,
                    prefixes.len()
                );
                let set = layout.build(&prefixes);
                cache::store(backend, &cid, &set)?;
                set
            }
        };

        layout.activate(&mut set, &self.view.args);
        Ok(set)
    }

    fn numeric_sentinel<'c>(&self, characters: &'c CharacterSet) -> Option<&'c Character> {
        characters.get(&self.options.numeric_value)
    }

    fn resolves_to_sentinel(&self, value: &str) -> Result<bool> {
        Ok(self.options.numbers == NumericMode::SingleLabel && self.is_numeric(value)?)
    }

    /// Display label for a value. Unknown values are echoed back.
    pub fn label(&self, value: &str) -> Result<String> {
        let characters = self.characters()?;
        if self.resolves_to_sentinel(value)? {
            return Ok(self
                .numeric_sentinel(characters)
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| self.options.numeric_label.clone()));
        }
        Ok(characters
            .get(value)
            .map(Character::label)
            .unwrap_or(value)
            .to_string())
    }

    /// Canonical value for a value. Numeric values collapse onto the
    /// sentinel in single label mode; known characters resolve to their label.
    pub fn value(&self, value: &str) -> Result<String> {
        let characters = self.characters()?;
        if self.resolves_to_sentinel(value)? {
            return Ok(self
                .numeric_sentinel(characters)
                .map(|c| c.value().to_string())
                .unwrap_or_else(|| self.options.numeric_value.clone()));
        }
        Ok(characters
            .get(value)
            .map(Character::label)
            .unwrap_or(value)
            .to_string())
    }

    /// URL of the listing without the pagination argument.
    pub fn url(&self) -> Result<&str> {
        self.url
            .get_or_try_init(|| Ok::<_, PaginationError>(view_url(&self.view, self.characters()?)))
            .map(String::as_str)
    }

    pub fn tokens(&self, value: Option<&str>) -> Result<TokenData> {
        Ok(TokenData {
            path: self.url()?.to_string(),
            value: value.map(str::to_string),
        })
    }

    /// Messages for everything that keeps this handler from working.
    pub fn validate(&self) -> Result<Vec<String>> {
        let mut messages = validate_display(&self.view, &self.handler);
        messages.extend(self.options.validate(&self.alphabet()?, &self.numbers()?));
        Ok(messages)
    }

    /// Link for one character, per the link options.
    pub fn build_link(&self, character: &Character) -> Result<Link> {
        let options = &self.options;
        let mut attributes = Attributes::default();
        attributes.add_classes(&options.link_class);

        let tokens = self.tokens(Some(character.value()))?;
        let path = replace_tokens(&options.link_path, &tokens, false);
        let external = options.link_external || path.starts_with('#');

        if !options.link_attributes.is_empty() {
            let mut parsed = parse_attributes(&options.link_attributes, &tokens);
            parsed.remove("class");
            attributes.others.extend(parsed);
        }

        let href = if external {
            path.clone()
        } else {
            internal_href(&path, &self.view.query_parameters)
        };

        Ok(Link {
            label: character.label().to_string(),
            path,
            href,
            external,
            attributes,
        })
    }

    /// The index as a list of links and inactive entries.
    pub fn render(&self) -> Result<PaginationList> {
        let options = &self.options;
        let mut wrapper = Attributes::default();
        wrapper.add_classes(&options.class);
        let mut list = Attributes::default();
        list.add_classes(&options.list_class);

        let mut items = Vec::new();
        for character in self.characters()? {
            if character.is_divider() {
                let mut item_wrapper = Attributes::default();
                item_wrapper.add_classes(&options.numeric_divider_class);
                items.push(PaginationItem {
                    wrapper: item_wrapper,
                    content: ItemContent::Divider,
                });
                continue;
            }

            let content = if character.is_link() {
                ItemContent::Link(self.build_link(character)?)
            } else {
                ItemContent::Inactive {
                    label: character.label().to_string(),
                }
            };

            let mut item_wrapper = Attributes::default();
            if character.is_all() {
                item_wrapper.add_classes(&options.all_class);
            }
            if character.is_numeric() {
                item_wrapper.add_classes(&options.numeric_class);
            }
            if character.is_active() {
                item_wrapper.add_classes(&options.active_class);
            } else if !character.is_enabled() {
                item_wrapper.add_classes(&options.inactive_class);
            }

            items.push(PaginationItem {
                wrapper: item_wrapper,
                content,
            });
        }

        Ok(PaginationList {
            wrapper,
            list,
            items,
        })
    }
}
