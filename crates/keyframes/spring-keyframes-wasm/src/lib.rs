use js_sys::JSON;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use spring_keyframes_core::{
    observed_frame, parse_request_json, AnimationFinished, AnimationState, ComputedStyle, Config,
    Frame, Options, Settlement, SynthesizedAnimation, Synthesizer, TimelineToken,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn from_js_or_default<T>(value: JsValue, what: &str) -> Result<T, JsError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if jsvalue_is_undefined_or_null(&value) {
        Ok(T::default())
    } else {
        swb::from_value(value).map_err(|e| JsError::new(&format!("{what} error: {e}")))
    }
}

/// Frames and maps go out as plain objects, not `Map`s.
fn to_js<T: Serialize>(value: &T, what: &str) -> Result<JsValue, JsError> {
    value
        .serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputeOutput {
    keyframes: Vec<String>,
    tweened: Vec<String>,
    duration: String,
    duration_ms: f64,
    easing: String,
    final_frame: f64,
}

impl From<&SynthesizedAnimation> for ComputeOutput {
    fn from(anim: &SynthesizedAnimation) -> Self {
        Self {
            keyframes: anim.keyframes(),
            tweened: anim.tweened.iter().map(ToString::to_string).collect(),
            duration: anim.duration(),
            duration_ms: anim.duration_ms,
            easing: anim.easing.clone(),
            final_frame: anim.final_frame,
        }
    }
}

/// Synthesize a timeline. `options` may be undefined/null for defaults.
/// Returns `{ keyframes, tweened, duration, durationMs, easing, finalFrame }`.
#[wasm_bindgen]
pub fn compute(from: JsValue, to: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    console_error_panic_hook::set_once();
    let from: Frame = from_js_or_default(from, "from")?;
    let to: Frame = swb::from_value(to).map_err(|e| JsError::new(&format!("to error: {e}")))?;
    let options: Options = from_js_or_default(options, "options")?;
    let anim = spring_keyframes_core::compute(&from, &to, &options)
        .map_err(|e| JsError::new(&format!("compute error: {e}")))?;
    to_js(&ComputeOutput::from(&anim), "output")
}

/// Synthesize from a `{ from, to, options }` request object.
#[wasm_bindgen(js_name = computeRequest)]
pub fn compute_request(request: JsValue) -> Result<JsValue, JsError> {
    if jsvalue_is_undefined_or_null(&request) {
        return Err(JsError::new("computeRequest: request is null/undefined"));
    }
    let s = JSON::stringify(&request)
        .map_err(|e| JsError::new(&format!("computeRequest stringify error: {:?}", e)))?
        .as_string()
        .ok_or_else(|| JsError::new("computeRequest: stringify produced non-string"))?;
    let req = parse_request_json(&s).map_err(|e| JsError::new(&format!("computeRequest {e}")))?;
    let anim = req
        .run(&Synthesizer::default())
        .map_err(|e| JsError::new(&format!("compute error: {e}")))?;
    to_js(&ComputeOutput::from(&anim), "output")
}

/// Start frame read off computed style text, limited to the keys of `to`.
#[wasm_bindgen(js_name = observedFrame)]
pub fn observed_frame_js(to: JsValue, computed: JsValue) -> Result<JsValue, JsError> {
    let to: Frame = swb::from_value(to).map_err(|e| JsError::new(&format!("to error: {e}")))?;
    let computed: ComputedStyle = from_js_or_default(computed, "computed style")?;
    to_js(&observed_frame(&to, &computed), "observed frame")
}

/// Options accepted by `SpringSubject.animateTo`: spring options plus an
/// optional start delay in ms.
#[derive(Default, Deserialize)]
struct TransitionOptions {
    #[serde(flatten)]
    options: Options,
    #[serde(default)]
    delay: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartedOutput {
    token: u32,
    name: String,
    animation: String,
    #[serde(flatten)]
    timeline: ComputeOutput,
}

/// One animated subject: owns its state between retargets.
#[wasm_bindgen]
pub struct SpringSubject {
    state: AnimationState,
    synth: Synthesizer,
}

#[wasm_bindgen]
impl SpringSubject {
    /// `new SpringSubject(initialFrame, prefix?, config?)`.
    #[wasm_bindgen(constructor)]
    pub fn new(initial: JsValue, prefix: Option<String>, config: JsValue) -> Result<SpringSubject, JsError> {
        console_error_panic_hook::set_once();
        let initial: Frame = from_js_or_default(initial, "initial frame")?;
        let cfg: Config = from_js_or_default(config, "config")?;
        let state = match prefix {
            Some(prefix) => AnimationState::with_prefix(initial, prefix),
            None => AnimationState::new(initial),
        };
        Ok(SpringSubject {
            state,
            synth: Synthesizer::new(cfg),
        })
    }

    /// Retarget toward `to`. `observed` is the subject's current frame, used
    /// only while a timeline is in flight.
    /// Returns `{ token, name, animation, keyframes, tweened, duration, ... }`.
    #[wasm_bindgen(js_name = animateTo)]
    pub fn animate_to(
        &mut self,
        to: JsValue,
        observed: JsValue,
        options: JsValue,
        now_ms: f64,
    ) -> Result<JsValue, JsError> {
        let to: Frame = swb::from_value(to).map_err(|e| JsError::new(&format!("to error: {e}")))?;
        let observed: Option<Frame> = if jsvalue_is_undefined_or_null(&observed) {
            None
        } else {
            Some(swb::from_value(observed).map_err(|e| JsError::new(&format!("observed error: {e}")))?)
        };
        let transition: TransitionOptions = from_js_or_default(options, "options")?;

        let started = self
            .state
            .animate_to(&self.synth, to, observed.as_ref(), &transition.options, now_ms)
            .map_err(|e| JsError::new(&format!("animateTo error: {e}")))?;

        let out = StartedOutput {
            token: started.token.0,
            name: started.name.clone(),
            animation: started.shorthand(transition.delay),
            timeline: ComputeOutput::from(&started.animation),
        };
        to_js(&out, "output")
    }

    /// Deliver a finished-notification. Returns false for stale tokens.
    #[wasm_bindgen(js_name = onAnimationEnd)]
    pub fn on_animation_end(&mut self, token: u32) -> bool {
        let event = AnimationFinished {
            token: TimelineToken(token),
        };
        self.state.on_settled(event) == Settlement::Completed
    }

    #[wasm_bindgen(js_name = estimateVelocity)]
    pub fn estimate_velocity(&self, now_ms: f64) -> f64 {
        self.state.estimate_velocity(now_ms)
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    /// Name of the playing keyframes, if any.
    #[wasm_bindgen(js_name = activeName)]
    pub fn active_name(&self) -> Option<String> {
        self.state.active().map(|a| a.name.clone())
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
