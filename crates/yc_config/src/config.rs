use core::cell::{Ref, RefCell};
use core::fmt;
use std::path::PathBuf;

use yc_doc::annotate::{CommentTable, annotate, normalize_empty_collections};
use yc_doc::{DocValue, yaml};
use yc_reflect::info::Typed;
use yc_reflect::mapper::{ObjectMapper, comment_table};
use yc_reflect::ops::Struct;
use yc_reflect::registry::ConverterRegistryArc;

use crate::guard::OpFlag;
use crate::transport::{EndpointTransport, FileTransport, FsTransport};
use crate::{ConfigError, Endpoint, Source};

// -----------------------------------------------------------------------------
// Config

/// A persistable value bound to one [`Source`].
///
/// `load` fills the value from the source, `save` writes it back as
/// annotated YAML. Both take `&self`, so a converter holding a handle may
/// call `save` while a save is running: the nested call is a no-op.
///
/// An empty source is bootstrapped on load: the current (default) value is
/// written to it once.
///
/// `Config` is `Send` when `T` is, but not `Sync`: one logical owner drives
/// it.
///
/// # Examples
///
/// ```
/// use yc_config::Config;
/// use yc_reflect::Reflect;
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Server {
///     #[reflect(comment = "Port to bind")]
///     port: u16,
///     motd: String,
/// }
///
/// let config = Config::new(Server { port: 25565, motd: String::new() });
/// config.bind_text("");
/// config.load().unwrap();
///
/// // The empty source was bootstrapped with the current value.
/// assert_eq!(config.text().unwrap(), "# Port to bind\nport: 25565\nmotd: ''\n");
///
/// config.bind_text("port: 8080\n");
/// config.load().unwrap();
/// assert_eq!(config.get().port, 8080);
/// ```
pub struct Config<T> {
    value: RefCell<T>,
    source: RefCell<Source>,
    loading: OpFlag,
    saving: OpFlag,
    auto_save: bool,
    registry: ConverterRegistryArc,
    files: Box<dyn FileTransport + Send>,
    endpoints: Option<Box<dyn EndpointTransport + Send>>,
}

impl<T: Struct + Typed> Config<T> {
    /// Wraps `value` with no source, the global registry and the default
    /// transports.
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            source: RefCell::new(Source::Unbound),
            loading: OpFlag::new(),
            saving: OpFlag::new(),
            auto_save: true,
            registry: ConverterRegistryArc::global().clone(),
            files: Box::new(FsTransport),
            endpoints: default_endpoint_transport(),
        }
    }

    /// Builds a config and runs `init` on it, which typically binds and
    /// loads.
    ///
    /// On failure the source is unbound, the error is logged and returned.
    pub fn create<F>(value: T, init: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&Self) -> Result<(), ConfigError>,
    {
        let config = Self::new(value);
        match init(&config) {
            Ok(()) => Ok(config),
            Err(err) => {
                let source = config.unbind();
                log::error!("Failed to set up `{}` from {source}: {err}", T::type_info().type_path());
                Err(err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Setup

    /// Uses `registry` instead of the global one.
    pub fn with_registry(mut self, registry: ConverterRegistryArc) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_file_transport(mut self, transport: impl FileTransport + Send + 'static) -> Self {
        self.files = Box::new(transport);
        self
    }

    pub fn with_endpoint_transport(
        mut self,
        transport: impl EndpointTransport + Send + 'static,
    ) -> Self {
        self.endpoints = Some(Box::new(transport));
        self
    }

    /// Enables or disables [`save`](Self::save). The bootstrap of an empty
    /// source writes regardless.
    #[inline]
    pub fn set_auto_save(&mut self, enabled: bool) {
        self.auto_save = enabled;
    }

    #[inline]
    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    // -------------------------------------------------------------------------
    // Binding

    /// Binds a file, creating it and its parent directories if missing.
    pub fn bind_file(&self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let path = path.into();
        if !self.files.exists(&path) {
            self.files
                .create_with_parents(&path)
                .map_err(|source| ConfigError::Bind {
                    path: path.clone(),
                    source,
                })?;
        }
        self.source.replace(Source::File(path));
        Ok(())
    }

    /// Binds an `http`/`https` endpoint. The address is validated now.
    pub fn bind_endpoint(&self, address: &str) -> Result<(), ConfigError> {
        let endpoint = Endpoint::parse(address)?;
        self.source.replace(Source::Endpoint(endpoint));
        Ok(())
    }

    /// Binds the in-memory text slot.
    pub fn bind_text(&self, text: impl Into<String>) {
        self.source.replace(Source::Text(text.into()));
    }

    /// Removes the binding, returning it.
    pub fn unbind(&self) -> Source {
        self.source.replace(Source::Unbound)
    }

    /// Returns the current binding.
    #[inline]
    pub fn source(&self) -> Ref<'_, Source> {
        self.source.borrow()
    }

    /// Returns the content of the text slot, if bound.
    pub fn text(&self) -> Option<String> {
        self.source.borrow().as_text().map(str::to_owned)
    }

    // -------------------------------------------------------------------------
    // Value

    /// Borrows the value.
    ///
    /// # Panics
    ///
    /// Panics if a load is writing the value, which can only happen from a
    /// converter called by that load.
    #[inline]
    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    #[inline]
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    #[inline]
    pub fn is_loading(&self) -> bool {
        self.loading.is_busy()
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving.is_busy()
    }

    // -------------------------------------------------------------------------
    // Load & Save

    /// Reads the bound source into the value.
    ///
    /// Keys missing from the document leave their field unchanged, unknown
    /// keys are ignored. An empty source is written with the current value
    /// once the read is over. A nested call during a load is a no-op.
    pub fn load(&self) -> Result<(), ConfigError> {
        let was_empty = {
            let Some(_guard) = self.loading.enter() else {
                log::debug!("Load of `{}` skipped: already loading.", T::type_info().type_path());
                return Ok(());
            };

            match self.read_source()? {
                Some(text) => match yaml::parse_mapping(&text)? {
                    Some(mapping) => {
                        let registry = self.registry.read();
                        let mut value = self.value.try_borrow_mut().map_err(|_| ConfigError::Borrowed)?;
                        ObjectMapper::new(&registry).from_map(&mapping, &mut *value)?;
                        false
                    }
                    None => true,
                },
                None => true,
            }
        };

        if was_empty {
            log::debug!("The source of `{}` is empty, writing the defaults.", T::type_info().type_path());
            self.write()?;
        }
        Ok(())
    }

    /// Writes the value to the bound source, or to the text slot when
    /// nothing is bound.
    ///
    /// A no-op when auto-save is disabled or during another save.
    ///
    /// A save requested while a load is running is dropped, not queued:
    /// loads never block on saves, but a save from inside a load (for
    /// example from a converter or an `init` hook) returns `Ok(())` without
    /// writing. The load itself writes the defaults back when the source
    /// was empty.
    pub fn save(&self) -> Result<(), ConfigError> {
        if !self.auto_save {
            log::debug!("Save of `{}` skipped: auto-save is disabled.", T::type_info().type_path());
            return Ok(());
        }
        if self.loading.is_busy() {
            log::debug!("Save of `{}` skipped: a load is running.", T::type_info().type_path());
            return Ok(());
        }
        self.write()
    }

    /// Renders the annotated YAML text of the value without writing it.
    pub fn render(&self) -> Result<String, ConfigError> {
        let mapping = {
            let registry = self.registry.read();
            let value = self.value.try_borrow().map_err(|_| ConfigError::Borrowed)?;
            ObjectMapper::new(&registry).to_map(&*value)?
        };

        let text = yaml::render(&DocValue::Mapping(mapping))?;
        let text = normalize_empty_collections(&text);
        let comments = match T::type_info().as_struct() {
            Some(info) => comment_table(info),
            None => CommentTable::new(),
        };
        Ok(annotate(&text, &comments))
    }

    fn write(&self) -> Result<(), ConfigError> {
        let Some(_guard) = self.saving.enter() else {
            log::debug!("Save of `{}` skipped: already saving.", T::type_info().type_path());
            return Ok(());
        };

        let text = self.render()?;
        let source = self.source.borrow().clone();
        log::debug!("Saving `{}` to {source}.", T::type_info().type_path());

        match source {
            Source::Unbound | Source::Text(_) => {
                self.source.replace(Source::Text(text));
            }
            Source::File(path) => {
                self.files
                    .write_all_text(&path, &text)
                    .map_err(ConfigError::io(&path))?;
            }
            Source::Endpoint(endpoint) => {
                let status = self.endpoint_transport()?.post(endpoint.uri(), text.as_bytes())?;
                if !(200..300).contains(&status) {
                    return Err(ConfigError::Status(status));
                }
            }
        }
        Ok(())
    }

    /// Returns the text of the source, `None` when it is empty.
    fn read_source(&self) -> Result<Option<String>, ConfigError> {
        let source = self.source.borrow().clone();
        log::debug!("Loading `{}` from {source}.", T::type_info().type_path());

        let text = match source {
            Source::Unbound => return Err(ConfigError::Unbound),
            Source::File(path) => {
                if !self.files.exists(&path)
                    || self.files.size(&path).map_err(ConfigError::io(&path))? == 0
                {
                    return Ok(None);
                }
                self.files
                    .read_all_text(&path)
                    .map_err(ConfigError::io(&path))?
            }
            Source::Endpoint(endpoint) => {
                let body = self.endpoint_transport()?.get(endpoint.uri())?;
                String::from_utf8(body)?
            }
            Source::Text(text) => text,
        };
        Ok((!text.is_empty()).then_some(text))
    }

    fn endpoint_transport(&self) -> Result<&(dyn EndpointTransport + Send), ConfigError> {
        self.endpoints.as_deref().ok_or(ConfigError::NoTransport)
    }
}

impl<T: Struct + Typed + Default> Default for Config<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> fmt::Debug for Config<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("type", &core::any::type_name::<T>())
            .field("source", &*self.source.borrow())
            .field("loading", &self.loading)
            .field("saving", &self.saving)
            .field("auto_save", &self.auto_save)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "http")]
fn default_endpoint_transport() -> Option<Box<dyn EndpointTransport + Send>> {
    Some(Box::new(crate::transport::HttpTransport::new()))
}

#[cfg(not(feature = "http"))]
fn default_endpoint_transport() -> Option<Box<dyn EndpointTransport + Send>> {
    None
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use std::collections::{BTreeMap, BTreeSet, HashSet};
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use http::Uri;
    use yc_doc::{DocValue, yaml};
    use yc_reflect::Reflect;
    use yc_reflect::registry::{ConverterRegistry, ConverterRegistryArc};

    use super::Config;
    use crate::transport::{EndpointTransport, FileTransport};
    use crate::{ConfigError, Source};

    // -------------------------------------------------------------------------
    // Fixtures

    #[derive(Reflect, Debug, PartialEq)]
    #[reflect(default)]
    struct Player {
        #[reflect(comment = "Player's display name")]
        name: String,
        tags: BTreeSet<String>,
        scores: BTreeMap<String, i32>,
    }

    impl Default for Player {
        fn default() -> Self {
            Self {
                name: "Steve".into(),
                tags: BTreeSet::new(),
                scores: BTreeMap::new(),
            }
        }
    }

    fn alice() -> Player {
        Player {
            name: "Alice".into(),
            tags: ["a".to_owned(), "b".to_owned()].into(),
            scores: [("x".to_owned(), 1)].into(),
        }
    }

    #[derive(Reflect, Debug, PartialEq)]
    #[reflect(default)]
    struct Server {
        #[reflect(comment = "Port to bind")]
        port: u16,
        motd: String,
    }

    impl Default for Server {
        fn default() -> Self {
            Self {
                port: 25565,
                motd: "welcome".into(),
            }
        }
    }

    /// An in-memory file system counting writes.
    #[derive(Clone, Default)]
    struct MemFiles {
        files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
        writes: Arc<AtomicUsize>,
    }

    impl MemFiles {
        fn content(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    fn not_found() -> io::Error {
        io::Error::from(io::ErrorKind::NotFound)
    }

    impl FileTransport for MemFiles {
        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn size(&self, path: &Path) -> io::Result<u64> {
            let files = self.files.lock().unwrap();
            files.get(path).map(|s| s.len() as u64).ok_or_else(not_found)
        }

        fn read_all_text(&self, path: &Path) -> io::Result<String> {
            self.files.lock().unwrap().get(path).cloned().ok_or_else(not_found)
        }

        fn write_all_text(&self, path: &Path, text: &str) -> io::Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.files.lock().unwrap().insert(path.to_owned(), text.to_owned());
            Ok(())
        }

        fn create_with_parents(&self, path: &Path) -> io::Result<()> {
            self.files.lock().unwrap().entry(path.to_owned()).or_default();
            Ok(())
        }
    }

    /// An in-process endpoint.
    #[derive(Clone)]
    struct MockEndpoint {
        body: Arc<Mutex<Vec<u8>>>,
        posts: Arc<Mutex<Vec<String>>>,
        status: u16,
    }

    impl MockEndpoint {
        fn new(body: &str, status: u16) -> Self {
            Self {
                body: Arc::new(Mutex::new(body.as_bytes().to_vec())),
                posts: Arc::default(),
                status,
            }
        }
    }

    impl EndpointTransport for MockEndpoint {
        fn get(&self, _: &Uri) -> Result<Vec<u8>, ConfigError> {
            Ok(self.body.lock().unwrap().clone())
        }

        fn post(&self, _: &Uri, body: &[u8]) -> Result<u16, ConfigError> {
            let text = String::from_utf8(body.to_vec()).map_err(ConfigError::transport)?;
            self.posts.lock().unwrap().push(text);
            Ok(self.status)
        }
    }

    fn isolated<T: yc_reflect::ops::Struct + yc_reflect::info::Typed>(value: T) -> Config<T> {
        Config::new(value).with_registry(ConverterRegistryArc::default())
    }

    // -------------------------------------------------------------------------
    // Scenarios

    #[test]
    fn alice_renders_with_comment_and_reads_back() {
        let config = isolated(alice());
        let text = config.render().unwrap();
        assert_eq!(
            text,
            "# Player's display name\nname: Alice\ntags:\n- a\n- b\nscores:\n  x: 1\n"
        );

        let back = isolated(Player::default());
        back.bind_text(text);
        back.load().unwrap();
        assert_eq!(*back.get(), alice());
    }

    #[test]
    fn missing_file_is_created_and_bootstrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players/alice.yml");

        let config = isolated(Server::default());
        config.bind_file(&path).unwrap();
        assert!(path.exists());

        config.load().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "# Port to bind\nport: 25565\nmotd: welcome\n");
        assert_eq!(*config.get(), Server::default());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.yml");

        let config = isolated(Server {
            port: 8080,
            motd: "line one\nline two".into(),
        });
        config.bind_file(&path).unwrap();
        config.save().unwrap();

        let loaded = isolated(Server::default());
        loaded.bind_file(&path).unwrap();
        loaded.load().unwrap();
        assert_eq!(loaded.into_inner(), config.into_inner());
    }

    #[test]
    fn compatible_with_older_and_newer_shapes() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        #[reflect(default)]
        struct V1 {
            a: String,
            b: u32,
            c: bool,
        }

        #[derive(Reflect, Default, Debug, PartialEq)]
        #[reflect(default)]
        struct Fewer {
            a: String,
            c: bool,
        }

        #[derive(Reflect, Debug, PartialEq)]
        #[reflect(default)]
        struct More {
            a: String,
            b: u32,
            c: bool,
            d: i64,
        }

        impl Default for More {
            fn default() -> Self {
                Self {
                    a: String::new(),
                    b: 0,
                    c: false,
                    d: 7,
                }
            }
        }

        let text = isolated(V1 {
            a: "x".into(),
            b: 2,
            c: true,
        })
        .render()
        .unwrap();

        let fewer = isolated(Fewer::default());
        fewer.bind_text(text.clone());
        fewer.load().unwrap();
        assert_eq!(*fewer.get(), Fewer { a: "x".into(), c: true });

        let more = isolated(More::default());
        more.bind_text(text);
        more.load().unwrap();
        assert_eq!(
            *more.get(),
            More {
                a: "x".into(),
                b: 2,
                c: true,
                d: 7
            }
        );
    }

    #[test]
    fn sets_and_lists_keep_their_contents() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        #[reflect(default)]
        struct Bag {
            unique: HashSet<String>,
            list: Vec<String>,
        }

        let bag = Bag {
            unique: ["x", "y", "z"].map(String::from).into(),
            list: ["b", "a", "b"].map(String::from).into(),
        };
        let config = isolated(bag);
        let text = config.render().unwrap();

        let mapping = yaml::parse_mapping(&text).unwrap().unwrap();
        assert_eq!(mapping.get("unique").and_then(DocValue::as_sequence).map(<[_]>::len), Some(3));

        let back = isolated(Bag::default());
        back.bind_text(text);
        back.load().unwrap();
        assert_eq!(back.into_inner(), config.into_inner());
    }

    #[test]
    fn multi_line_strings_survive_a_save() {
        let server = Server {
            port: 1,
            motd: String::from("header:\n[]\nend:\n{}"),
        };
        let config = isolated(server);
        let text = config.render().unwrap();

        let back = isolated(Server::default());
        back.bind_text(text);
        back.load().unwrap();
        assert_eq!(back.get().motd, "header:\n[]\nend:\n{}");
    }

    #[test]
    fn floats_render_in_shortest_form() {
        #[derive(Reflect, Default, Debug, PartialEq)]
        #[reflect(default)]
        struct Tuning {
            ratio: f32,
            scale: f64,
        }

        let config = isolated(Tuning { ratio: 0.1, scale: 2.5 });
        let text = config.render().unwrap();
        assert_eq!(text, "ratio: 0.1\nscale: 2.5\n");

        let back = isolated(Tuning::default());
        back.bind_text("ratio: 1e300\nscale: 1e300\n");
        back.load().unwrap();
        assert_eq!(back.get().ratio, 0.0);
        assert_eq!(back.get().scale, 1e300);

        back.bind_text(text);
        back.load().unwrap();
        assert_eq!(back.into_inner(), config.into_inner());
    }

    #[test]
    fn invalid_leaf_keeps_current_value() {
        let config = isolated(Server::default());
        config.bind_text("port: lots\nmotd: hi\n");
        config.load().unwrap();
        assert_eq!(config.get().port, 25565);
        assert_eq!(config.get().motd, "hi");
    }

    #[test]
    fn structural_error_fails_with_key() {
        let config = isolated(Player::default());
        config.bind_text("name: Bob\ntags: 5\n");
        let err = config.load().unwrap_err();
        match err {
            ConfigError::Convert(err) => assert_eq!(err.key_path(), ["tags"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_mapping_root_is_an_error() {
        let config = isolated(Server::default());
        config.bind_text("- 1\n- 2\n");
        assert!(matches!(config.load(), Err(ConfigError::Codec(_))));
    }

    // -------------------------------------------------------------------------
    // Lifecycle

    #[test]
    fn unbound_load_fails_and_unbound_save_binds_text() {
        let config = isolated(Server::default());
        assert!(matches!(config.load(), Err(ConfigError::Unbound)));

        config.save().unwrap();
        assert_eq!(config.text().unwrap(), "# Port to bind\nport: 25565\nmotd: welcome\n");
    }

    #[test]
    fn disabled_auto_save_still_bootstraps() {
        let files = MemFiles::default();
        let mut config = isolated(Server::default()).with_file_transport(files.clone());
        config.set_auto_save(false);
        config.bind_file("server.yml").unwrap();

        config.save().unwrap();
        assert_eq!(files.writes(), 0);

        config.load().unwrap();
        assert_eq!(files.writes(), 1);
        assert!(files.content("server.yml").unwrap().contains("port: 25565"));
    }

    #[test]
    fn rebinding_replaces_the_source() {
        let config = isolated(Server::default());
        config.bind_text("port: 1\n");
        config.bind_endpoint("https://example.net/server").unwrap();
        assert!(matches!(&*config.source(), Source::Endpoint(_)));
        assert!(config.text().is_none());

        let previous = config.unbind();
        assert_eq!(previous.as_endpoint().unwrap().address(), "https://example.net/server");
        assert!(!config.source().is_bound());
    }

    #[test]
    fn malformed_endpoint_fails_at_bind() {
        let config = isolated(Server::default());
        config.bind_text("port: 1\n");
        let err = config.bind_endpoint("ftp://example.net/server").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
        assert_eq!(config.text().unwrap(), "port: 1\n");
    }

    #[test]
    fn endpoint_load_and_save() {
        let endpoint = MockEndpoint::new("motd: remote\n", 204);
        let config = isolated(Server::default()).with_endpoint_transport(endpoint.clone());
        config.bind_endpoint("http://127.0.0.1:9000/server").unwrap();

        config.load().unwrap();
        assert_eq!(config.get().motd, "remote");
        assert!(endpoint.posts.lock().unwrap().is_empty());

        config.save().unwrap();
        let posts = endpoint.posts.lock().unwrap();
        assert_eq!(posts.as_slice(), ["# Port to bind\nport: 25565\nmotd: remote\n"]);
    }

    #[test]
    fn empty_endpoint_is_bootstrapped() {
        let endpoint = MockEndpoint::new("", 200);
        let config = isolated(Server::default()).with_endpoint_transport(endpoint.clone());
        config.bind_endpoint("http://127.0.0.1:9000/server").unwrap();
        config.load().unwrap();
        assert_eq!(endpoint.posts.lock().unwrap().len(), 1);
    }

    #[test]
    fn endpoint_failure_status_is_fatal() {
        let endpoint = MockEndpoint::new("", 503);
        let config = isolated(Server::default()).with_endpoint_transport(endpoint);
        config.bind_endpoint("http://127.0.0.1:9000/server").unwrap();
        assert!(matches!(config.save(), Err(ConfigError::Status(503))));
        assert!(!config.is_saving());
    }

    #[test]
    fn create_reports_init_failure() {
        let result = Config::create(Server::default(), |config| {
            config.bind_text("port: 1\n");
            config.bind_endpoint("not an address")
        });
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));

        let config = Config::create(Server::default(), |config| {
            config.bind_text("port: 7\n");
            config.load()
        })
        .unwrap();
        assert_eq!(config.get().port, 7);
    }

    // -------------------------------------------------------------------------
    // Re-entrancy

    #[derive(Reflect, Default, Clone, Copy, PartialEq, Debug)]
    #[reflect(opaque, default)]
    struct Hook;

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Hooked {
        hook: Hook,
        name: String,
    }

    thread_local! {
        static HANDLE: Cell<Option<&'static Config<Hooked>>> = const { Cell::new(None) };
    }

    #[test]
    fn save_from_a_converter_is_a_no_op() {
        let mut registry = ConverterRegistry::new();
        registry.register::<Hook>(
            |_| {
                HANDLE.with(|handle| {
                    if let Some(config) = handle.get() {
                        assert!(config.is_saving());
                        config.save().unwrap();
                    }
                });
                Ok(DocValue::from("hook"))
            },
            |_| Ok(Hook),
        );

        let files = MemFiles::default();
        let config: &'static Config<Hooked> = Box::leak(Box::new(
            Config::new(Hooked::default())
                .with_registry(ConverterRegistryArc::new(registry))
                .with_file_transport(files.clone()),
        ));
        HANDLE.with(|handle| handle.set(Some(config)));

        config.bind_file("hooked.yml").unwrap();
        config.save().unwrap();
        assert_eq!(files.writes(), 1);
        assert_eq!(files.content("hooked.yml").unwrap(), "hook: hook\nname: ''\n");
        assert!(!config.is_saving());

        // An empty load bootstraps through the same guarded path.
        files.files.lock().unwrap().insert("hooked.yml".into(), String::new());
        config.load().unwrap();
        assert_eq!(files.writes(), 2);

        HANDLE.with(|handle| handle.set(None));
    }
}
