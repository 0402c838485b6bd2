//! The conversion orchestrator.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::error::ConvertError;
use super::types::{ConversionJob, ConversionOutcome};
use crate::config::Config;
use crate::format::Format;
use crate::handler::{
    Handler, HandlerRegistry, JsonFlattener, MarkupHandler, MediaHandler, OfficeHandler,
    ToolContext,
};
use crate::router::{route, Plan, RouteError};
use crate::runner::{ProcessRunner, ToolRunner};

/// Converts one file into another, choosing the handler from the two
/// extensions.
///
/// Holds no per-conversion state: every call classifies, routes, probes and
/// runs from scratch. The registry is fixed once the converter is built.
pub struct FileConverter<R: ?Sized = ProcessRunner> {
    config: Config,
    registry: HandlerRegistry,
    markup: MarkupHandler<R>,
    image: MediaHandler<R>,
    audio: MediaHandler<R>,
    video: MediaHandler<R>,
    office: OfficeHandler<R>,
    flattener: JsonFlattener,
}

impl FileConverter<ProcessRunner> {
    /// Creates a converter spawning real processes with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(Config::default(), ProcessRunner::new())
    }
}

impl<R: ToolRunner> FileConverter<R> {
    /// Creates a converter with the given configuration and runner.
    pub fn new(config: Config, runner: R) -> Self {
        Self::with_shared_runner(config, Arc::new(runner))
    }
}

impl<R: ToolRunner + ?Sized> FileConverter<R> {
    /// Creates a converter around a runner that is shared with the caller.
    pub fn with_shared_runner(config: Config, runner: Arc<R>) -> Self {
        let ctx = ToolContext::new(runner, config.tools.clone(), config.timeouts.clone());

        Self {
            registry: HandlerRegistry::with_builtins(),
            markup: MarkupHandler::new(ctx.clone()),
            image: MediaHandler::image(ctx.clone()),
            audio: MediaHandler::audio(ctx.clone()),
            video: MediaHandler::video(ctx.clone()),
            office: OfficeHandler::new(ctx),
            flattener: JsonFlattener::new(),
            config,
        }
    }

    /// Registers an extra in-process handler for a pair.
    ///
    /// Only consulted for pairs no category serves, or as the markup
    /// fallback for markup pairs.
    pub fn with_handler(
        mut self,
        input: Format,
        output: Format,
        handler: Arc<dyn Handler>,
    ) -> Self {
        self.registry.register(input, output, handler);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Every format this converter can classify.
    pub fn supported_formats(&self) -> &'static [Format] {
        &Format::ALL
    }

    /// Decides the plan for a pair of paths without running anything.
    pub fn plan(&self, job: &ConversionJob) -> Result<Plan, ConvertError> {
        route(job.input_format, job.output_format, |i, o| {
            self.registry.contains(i, o)
        })
        .map_err(|e| match e {
            RouteError::UnknownFormat { input, .. } => ConvertError::UnknownFormat {
                path: if input.is_unknown() {
                    job.input_path.clone()
                } else {
                    job.output_path.clone()
                },
            },
            RouteError::UnsupportedPair { input, output } => {
                ConvertError::UnsupportedPair { input, output }
            }
        })
    }

    /// Converts `input` into `output`.
    ///
    /// On failure the output path is left as the tool left it; partial
    /// output is not removed.
    pub async fn try_convert(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<ConversionOutcome, ConvertError> {
        let start = Instant::now();
        let job = ConversionJob::new(input, output)?;
        let plan = self.plan(&job)?;
        debug!(
            input = %job.input_path.display(),
            output = %job.output_path.display(),
            ?plan,
            "Routed conversion"
        );

        let handler = self.execute(plan, &job).await?;
        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            input = %job.input_path.display(),
            output = %job.output_path.display(),
            handler = %handler,
            duration_ms,
            "Conversion finished"
        );

        Ok(ConversionOutcome {
            input_path: job.input_path,
            output_path: job.output_path,
            input_format: job.input_format,
            output_format: job.output_format,
            handler,
            duration_ms,
        })
    }

    /// Converts `input` into `output`, reporting failure as `false` plus one
    /// diagnostic line on stderr.
    pub async fn convert(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> bool {
        match self.try_convert(input, output).await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = ?e, "Conversion failed");
                eprintln!("error: {}", e.diagnostic());
                false
            }
        }
    }

    /// Runs the plan and returns the name of the handler that served it.
    async fn execute(&self, plan: Plan, job: &ConversionJob) -> Result<String, ConvertError> {
        match plan {
            Plan::StructuredToText => self.run_markup_with_builtin(&self.flattener, job).await,
            Plan::Markup { input, output } => match self.registry.get(input, output) {
                Some(builtin) => self.run_markup_with_builtin(builtin.as_ref(), job).await,
                None => run_handler(&self.markup, job).await,
            },
            Plan::Image => run_handler(&self.image, job).await,
            Plan::Audio => run_handler(&self.audio, job).await,
            Plan::Video => run_handler(&self.video, job).await,
            Plan::Office { .. } => run_handler(&self.office, job).await,
            Plan::Registered { input, output } => {
                let handler = self
                    .registry
                    .get(input, output)
                    .ok_or(ConvertError::UnsupportedPair { input, output })?;
                run_handler(handler.as_ref(), job).await
            }
        }
    }

    /// Serves a markup pair that also has an in-process handler, in the
    /// order chosen by `markup.prefer_builtin`.
    async fn run_markup_with_builtin(
        &self,
        builtin: &dyn Handler,
        job: &ConversionJob,
    ) -> Result<String, ConvertError> {
        if self.config.markup.prefer_builtin {
            return run_handler(builtin, job).await;
        }

        match run_handler(&self.markup, job).await {
            Err(ConvertError::ToolMissing { tool }) => {
                warn!(
                    tool = %tool,
                    fallback = builtin.name(),
                    "Markup tool missing, using built-in handler"
                );
                run_handler(builtin, job).await
            }
            result => result,
        }
    }
}

async fn run_handler(handler: &dyn Handler, job: &ConversionJob) -> Result<String, ConvertError> {
    handler.run(job).await?;
    Ok(handler.name().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MarkupConfig;
    use crate::runner::{Tool, ToolOutput};
    use crate::testing::MockRunner;
    use tempfile::TempDir;

    fn converter(runner: &MockRunner, prefer_builtin: bool) -> FileConverter<MockRunner> {
        let config = Config {
            markup: MarkupConfig { prefer_builtin },
            ..Default::default()
        };
        FileConverter::with_shared_runner(config, Arc::new(runner.clone()))
    }

    #[tokio::test]
    async fn test_unknown_format_names_the_path() {
        let runner = MockRunner::new();
        let err = converter(&runner, true)
            .try_convert("/a/in.txt", "/a/out.xyz")
            .await
            .unwrap_err();
        assert!(
            matches!(err, ConvertError::UnknownFormat { ref path } if path.ends_with("out.xyz"))
        );
        assert!(runner.invocations().await.is_empty());
    }

    #[tokio::test]
    async fn test_routes_each_category_to_its_tool() {
        let cases = [
            ("/m/a.md", "/m/a.html", "pandoc"),
            ("/m/a.png", "/m/a.gif", "magick"),
            ("/m/a.wav", "/m/a.flac", "ffmpeg"),
            ("/m/a.avi", "/m/a.webm", "ffmpeg"),
        ];
        for (input, output, tool) in cases {
            let runner = MockRunner::new();
            let outcome = converter(&runner, true)
                .try_convert(input, output)
                .await
                .unwrap();
            let runs = runner.runs().await;
            assert_eq!(runs.len(), 1, "{input} -> {output}");
            assert_eq!(runs[0].tool(), tool);
            assert!(!outcome.handler.is_empty());
        }
    }

    #[tokio::test]
    async fn test_json_to_txt_builtin_first_skips_pandoc() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.json");
        let output = dir.path().join("a.txt");
        std::fs::write(&input, r#"{"k":"v"}"#).unwrap();

        let runner = MockRunner::new();
        let outcome = converter(&runner, true)
            .try_convert(&input, &output)
            .await
            .unwrap();

        assert_eq!(outcome.handler, "json-flatten");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "k: v\n");
        assert!(runner.invocations().await.is_empty());
    }

    #[tokio::test]
    async fn test_json_to_txt_external_first_uses_pandoc() {
        let runner = MockRunner::new();
        let outcome = converter(&runner, false)
            .try_convert("/d/a.json", "/d/a.txt")
            .await
            .unwrap();

        assert_eq!(outcome.handler, "markup");
        let runs = runner.runs().await;
        assert_eq!(runs.len(), 1);
        assert_eq!(
            runs[0].args,
            vec!["/d/a.json", "-f", "json", "-t", "plain", "-o", "/d/a.txt"]
        );
    }

    #[tokio::test]
    async fn test_external_first_falls_back_when_pandoc_missing() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.csv");
        let output = dir.path().join("a.txt");
        std::fs::write(&input, "a,b\n").unwrap();

        let runner = MockRunner::new();
        runner.set_available("pandoc", false).await;
        let outcome = converter(&runner, false)
            .try_convert(&input, &output)
            .await
            .unwrap();

        assert_eq!(outcome.handler, "csv-to-txt");
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "a b\n");
        assert_eq!(runner.probes().await.len(), 1);
        assert!(runner.runs().await.is_empty());
    }

    #[tokio::test]
    async fn test_external_failure_is_not_masked_by_fallback() {
        let runner = MockRunner::new();
        runner
            .on_run("pandoc", |_| ToolOutput::failed(1, "bad input"))
            .await;
        let err = converter(&runner, false)
            .try_convert("/d/a.txt", "/d/a.csv")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::ExternalFailure {
                tool: Tool::Pandoc,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_registered_cross_category_pair() {
        struct Recorder;

        #[async_trait::async_trait]
        impl Handler for Recorder {
            fn name(&self) -> &str {
                "recorder"
            }

            async fn run(&self, _job: &ConversionJob) -> Result<(), ConvertError> {
                Ok(())
            }
        }

        let runner = MockRunner::new();
        let converter =
            converter(&runner, true).with_handler(Format::Mp4, Format::Gif, Arc::new(Recorder));

        let outcome = converter.try_convert("/v/clip.mp4", "/v/clip.gif").await.unwrap();
        assert_eq!(outcome.handler, "recorder");
        assert!(runner.invocations().await.is_empty());

        let err = converter.try_convert("/v/clip.gif", "/v/clip.mp4").await.unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedPair { .. }));
    }

    #[tokio::test]
    async fn test_convert_returns_false_on_failure() {
        let runner = MockRunner::new();
        runner.set_available("magick", false).await;
        let converter = converter(&runner, true);
        assert!(!converter.convert("/p/a.bmp", "/p/a.ico").await);
        assert!(converter.convert("/p/a.wav", "/p/a.mp3").await);
    }

    #[test]
    fn test_supported_formats() {
        let converter = FileConverter::with_defaults();
        let formats = converter.supported_formats();
        assert_eq!(formats.len(), 32);
        assert!(!formats.contains(&Format::Unknown));
        assert_eq!(converter.registry().len(), 2);
    }
}
