use anyhow::anyhow;
use raystream_core::constants::FFT_SIZE;
use raystream_core::FrequencySource;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// media element -> analyser -> destination
pub struct AudioGraph {
    pub audio_ctx: web::AudioContext,
    pub analyser: web::AnalyserNode,
    source: web::MediaElementAudioSourceNode,
}

impl AudioGraph {
    /// Create the processing context. Failure means the host has no WebAudio;
    /// callers treat that as degraded mode rather than an error.
    pub fn create_context() -> anyhow::Result<web::AudioContext> {
        web::AudioContext::new().map_err(|e| anyhow!("AudioContext unavailable: {:?}", e))
    }

    pub fn build(
        audio_ctx: web::AudioContext,
        element: &web::HtmlMediaElement,
    ) -> anyhow::Result<Self> {
        let built = Self::wire(&audio_ctx, element);
        match built {
            Ok((analyser, source)) => Ok(Self {
                audio_ctx,
                analyser,
                source,
            }),
            Err(e) => {
                close_context(&audio_ctx);
                Err(e)
            }
        }
    }

    fn wire(
        audio_ctx: &web::AudioContext,
        element: &web::HtmlMediaElement,
    ) -> anyhow::Result<(web::AnalyserNode, web::MediaElementAudioSourceNode)> {
        let analyser = web::AnalyserNode::new(audio_ctx)
            .map_err(|e| anyhow!("AnalyserNode error: {:?}", e))?;
        analyser.set_fft_size(FFT_SIZE);
        let source = audio_ctx
            .create_media_element_source(element)
            .map_err(|e| anyhow!("MediaElementSource error: {:?}", e))?;
        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| anyhow!("connect source->analyser: {:?}", e))?;
        analyser
            .connect_with_audio_node(&audio_ctx.destination())
            .map_err(|e| anyhow!("connect analyser->destination: {:?}", e))?;
        log::info!(
            "[audio] analyser connected fft={} bins={}",
            FFT_SIZE,
            analyser.frequency_bin_count()
        );
        Ok((analyser, source))
    }

    /// Tear the graph down; a context that is already closed is left alone.
    pub fn close(self) {
        _ = self.source.disconnect();
        _ = self.analyser.disconnect();
        close_context(&self.audio_ctx);
    }
}

fn close_context(audio_ctx: &web::AudioContext) {
    if audio_ctx.state() == web::AudioContextState::Closed {
        return;
    }
    match audio_ctx.close() {
        Ok(promise) => spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("[audio] close rejected (already closed?): {:?}", e);
            }
        }),
        Err(e) => log::debug!("[audio] close error ignored: {:?}", e),
    }
}

/// Resume a context the browser suspended for autoplay policy.
pub fn resume_if_suspended(audio_ctx: &web::AudioContext) -> Option<js_sys::Promise> {
    if audio_ctx.state() != web::AudioContextState::Suspended {
        return None;
    }
    match audio_ctx.resume() {
        Ok(p) => Some(p),
        Err(e) => {
            log::warn!("[audio] resume error: {:?}", e);
            None
        }
    }
}

/// Byte spectrum straight from the analyser node.
pub struct AnalyserSource {
    node: web::AnalyserNode,
}

impl AnalyserSource {
    pub fn new(node: web::AnalyserNode) -> Self {
        Self { node }
    }
}

impl FrequencySource for AnalyserSource {
    fn bin_count(&self) -> usize {
        self.node.frequency_bin_count() as usize
    }

    fn fill_bytes(&mut self, out: &mut [u8]) {
        self.node.get_byte_frequency_data(out);
    }
}
