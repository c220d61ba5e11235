//! The display controller: lifecycle, per-tick update, and teardown.

use std::collections::BTreeMap;
use std::sync::Arc;

use decalcast_core::{
    CommandQueue, DisplayCommand, DisplayOptions, FrameCache, ImageStream, Pose, Subscription,
    TransformSource, Vec4,
};
use decalcast_render::{
    DecalBinder, DecalEngine, MaterialBindings, RenderQueueId, RenderQueueListener,
    RenderTargetListener,
};

use crate::quad::Quad;

/// Lifecycle states of a decal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Constructed but `on_initialize` has not run.
    Uninitialized,
    /// Ready to be enabled; owns zero quads.
    Initialized,
    /// Subscribed and rendering.
    Enabled,
    /// Torn down; can be re-enabled.
    Disabled,
}

/// Severity of a status row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusLevel {
    Ok,
    Warn,
    Error,
}

/// Named status rows for one quad ("Topic", "Transform", "Image").
#[derive(Debug, Clone, Default)]
pub struct QuadStatus {
    entries: BTreeMap<&'static str, (StatusLevel, String)>,
}

impl QuadStatus {
    fn set(&mut self, key: &'static str, level: StatusLevel, message: impl Into<String>) {
        self.entries.insert(key, (level, message.into()));
    }

    /// Returns the level for `key`; absent rows read as Ok.
    #[must_use]
    pub fn level(&self, key: &str) -> StatusLevel {
        self.entries
            .get(key)
            .map_or(StatusLevel::Ok, |(level, _)| *level)
    }

    /// Returns the message for `key`, if one is set.
    #[must_use]
    pub fn message(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|(_, msg)| msg.as_str())
    }

    /// Returns the worst level across all rows.
    #[must_use]
    pub fn worst(&self) -> StatusLevel {
        self.entries
            .values()
            .map(|(level, _)| *level)
            .max()
            .unwrap_or(StatusLevel::Ok)
    }
}

/// Result of one tick's anchor-transform resolution.
#[derive(Debug, Clone, Copy)]
struct TransformTick {
    /// Whether the lookup succeeded this tick.
    resolved: bool,
    /// Whether the pose moved beyond the configured tolerance.
    moved: bool,
}

/// Projects subscribed camera images onto quads anchored to a tracked frame.
///
/// The host framework drives the lifecycle (`on_initialize`, `on_enable`,
/// `on_disable`, `update`, `reset`) and registers the controller's
/// [`RenderQueueListener`] and [`RenderTargetListener`] implementations with
/// the engine separately. UI property handlers push onto the command queue;
/// all render state is mutated only inside `update`.
pub struct CameraQuadDisplay {
    state: DisplayState,
    options: DisplayOptions,
    quads: Vec<Quad>,
    statuses: Vec<QuadStatus>,
    subscriptions: Vec<Option<Subscription>>,
    frames: Arc<FrameCache>,
    commands: Arc<CommandQueue>,
    binder: DecalBinder,
    stream: Arc<dyn ImageStream>,
    transforms: Arc<dyn TransformSource>,
    time_since_last_transform: f32,
    last_frame_pose: Option<Pose>,
    rebuild_all: bool,
}

impl CameraQuadDisplay {
    /// Creates a display over the given image stream and transform source.
    #[must_use]
    pub fn new(
        options: DisplayOptions,
        stream: Arc<dyn ImageStream>,
        transforms: Arc<dyn TransformSource>,
    ) -> Self {
        Self {
            state: DisplayState::Uninitialized,
            options,
            quads: Vec::new(),
            statuses: Vec::new(),
            subscriptions: Vec::new(),
            frames: Arc::new(FrameCache::new(0)),
            commands: Arc::new(CommandQueue::new()),
            binder: DecalBinder::new(),
            stream,
            transforms,
            time_since_last_transform: 0.0,
            last_frame_pose: None,
            rebuild_all: false,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Returns the current options.
    #[must_use]
    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Returns the command queue handle for UI property handlers.
    #[must_use]
    pub fn command_queue(&self) -> Arc<CommandQueue> {
        Arc::clone(&self.commands)
    }

    /// Returns a quad record.
    #[must_use]
    pub fn quad(&self, index: usize) -> Option<&Quad> {
        self.quads.get(index)
    }

    /// Returns the configured quad count.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Returns a quad's status rows.
    #[must_use]
    pub fn status(&self, index: usize) -> Option<&QuadStatus> {
        self.statuses.get(index)
    }

    /// Returns seconds since the anchor transform last resolved.
    #[must_use]
    pub fn time_since_last_transform(&self) -> f32 {
        self.time_since_last_transform
    }

    /// Returns whether quad `index` has a decal staged for this tick.
    #[must_use]
    pub fn is_decal_active(&self, index: usize) -> bool {
        self.binder.is_active(index)
    }

    /// UI handler: geometry properties changed for one quad.
    ///
    /// Only schedules the change; the next `update` applies it.
    pub fn update_mesh_properties(
        &self,
        quad: usize,
        width: f32,
        height: f32,
        border_size: f32,
        border_color: Vec4,
    ) {
        self.commands
            .push(DisplayCommand::SetQuadSize { quad, width, height });
        self.commands.push(DisplayCommand::SetBorder {
            quad,
            size: border_size,
            color: border_color,
        });
    }

    /// UI handler: the image topic changed for one quad.
    pub fn update_display_images(&self, quad: usize, topic: impl Into<String>) {
        self.commands.push(DisplayCommand::SetImageTopic {
            quad,
            topic: topic.into(),
        });
    }

    /// Host lifecycle: construct property bindings; owns zero quads.
    pub fn on_initialize(&mut self) {
        if self.state != DisplayState::Uninitialized {
            log::warn!("on_initialize called twice; ignoring");
            return;
        }
        self.state = DisplayState::Initialized;
        log::info!(
            "decal display initialized ({} quads configured)",
            self.options.quad_count()
        );
    }

    /// Host lifecycle: subscribe and build quads from current options.
    pub fn on_enable<E: DecalEngine>(&mut self, engine: &mut E) {
        match self.state {
            DisplayState::Uninitialized => {
                log::warn!("on_enable before on_initialize; ignoring");
                return;
            }
            DisplayState::Enabled => return,
            DisplayState::Initialized | DisplayState::Disabled => {}
        }
        self.state = DisplayState::Enabled;
        self.frames.resize(self.options.quad_count());
        self.rebuild_quads(engine);
    }

    /// Host lifecycle: unsubscribe, release decals, destroy all quads.
    pub fn on_disable<E: DecalEngine>(&mut self, engine: &mut E) {
        if self.state != DisplayState::Enabled {
            return;
        }
        self.teardown(engine);
        self.state = DisplayState::Disabled;
    }

    /// Host lifecycle: equivalent to disable+clear with counters zeroed.
    pub fn reset<E: DecalEngine>(&mut self, engine: &mut E) {
        if self.state == DisplayState::Uninitialized {
            return;
        }
        self.teardown(engine);
        self.state = DisplayState::Initialized;
    }

    /// Host lifecycle: one frame tick.
    ///
    /// Drains property commands, resolves the anchor transform, rebuilds
    /// whatever went stale, repositions projectors, and stages the latest
    /// cached frame per quad for the binder.
    pub fn update<E: DecalEngine>(&mut self, wall_dt: f32, _ros_dt: f32, engine: &mut E) {
        if self.state != DisplayState::Enabled {
            return;
        }
        self.time_since_last_transform += wall_dt;

        self.apply_commands();
        if self.rebuild_all {
            self.rebuild_quads(engine);
            if self.state != DisplayState::Enabled {
                return;
            }
        }

        let tick = self.resolve_transform();

        for i in 0..self.quads.len() {
            let frame = self.frames.latest(i);
            let valid_frame = frame.as_deref().filter(|f| !f.is_empty());

            // Geometry: explicit properties win, otherwise derive from the
            // image once one is available.
            let desired = self.quads[i].desired_size(valid_frame, self.options.meters_per_pixel);
            let dirty = self.quads[i].take_dirty();
            let rebuilt = dirty || desired != self.quads[i].resolved_size();
            if rebuilt {
                self.quads[i].rebuild_mesh(desired);
                self.quads[i].attach(engine);
            }

            // Projector: only touched on a fresh lookup; a failed lookup
            // leaves the last transform frozen with the stale flag raised.
            if tick.resolved {
                if let Some(pose) = self.last_frame_pose {
                    let aspect = valid_frame.map_or_else(
                        || {
                            let extent = self.quads[i].mesh().extent();
                            if extent.y > 0.0 {
                                extent.x / extent.y
                            } else {
                                0.0
                            }
                        },
                        decalcast_core::ImageFrame::aspect_ratio,
                    );
                    let needs_reposition = tick.moved
                        || rebuilt
                        || !self.quads[i].projector().is_initialized()
                        || self.quads[i].projector().is_stale()
                        || (self.quads[i].projector().decal().aspect_ratio() - aspect).abs()
                            > 1e-6;
                    if needs_reposition {
                        let anchor = self.quads[i].world_anchor(&pose);
                        let extent = self.quads[i].mesh().extent();
                        self.quads[i].projector_mut().reposition(anchor, extent, aspect);
                    }
                    self.quads[i].place(engine, &pose);
                }
            }

            self.stage_quad(i, frame);
        }
    }

    /// Stages or suppresses quad `i`'s decal for the coming render pass.
    fn stage_quad(&mut self, i: usize, frame: Option<Arc<decalcast_core::ImageFrame>>) {
        let projector_ready = {
            let p = self.quads[i].projector();
            p.is_initialized() && !p.is_stale()
        };
        let mesh_ok = !self.quads[i].mesh().is_empty();

        match frame {
            Some(frame) if frame.is_empty() => {
                self.statuses[i].set("Image", StatusLevel::Warn, "zero-sized image");
                self.binder.suppress(i);
            }
            Some(frame) if projector_ready && mesh_ok => {
                self.statuses[i].set("Image", StatusLevel::Ok, "receiving images");
                let projection = self.quads[i].projector().decal().texture_projection_matrix();
                self.binder.stage(i, frame, projection);
            }
            Some(_) => {
                // Frame present but transform stale or geometry degenerate.
                self.binder.suppress(i);
            }
            None => {
                self.statuses[i].set("Image", StatusLevel::Warn, "no image received");
                self.binder.suppress(i);
            }
        }
    }

    /// Resolves the anchor frame for this tick.
    fn resolve_transform(&mut self) -> TransformTick {
        if !self.options.has_valid_frame() {
            for i in 0..self.quads.len() {
                self.quads[i].projector_mut().mark_stale();
                self.statuses[i].set("Transform", StatusLevel::Error, "no frame configured");
            }
            return TransformTick {
                resolved: false,
                moved: false,
            };
        }

        match self.transforms.lookup(&self.options.tf_frame) {
            Ok(stamped) => {
                let tol = self.options.pose_tolerance;
                let moved = self
                    .last_frame_pose
                    .map_or(true, |last| !last.approx_eq(&stamped.pose, tol, tol));
                self.last_frame_pose = Some(stamped.pose);
                self.time_since_last_transform = 0.0;
                for i in 0..self.quads.len() {
                    self.statuses[i].set("Transform", StatusLevel::Ok, "resolved");
                }
                TransformTick {
                    resolved: true,
                    moved,
                }
            }
            Err(err) => {
                log::debug!("transform lookup failed: {err}");
                for i in 0..self.quads.len() {
                    self.quads[i].projector_mut().mark_stale();
                    self.statuses[i].set("Transform", StatusLevel::Warn, err.to_string());
                }
                TransformTick {
                    resolved: false,
                    moved: false,
                }
            }
        }
    }

    /// Applies queued property commands to the options and dirty flags.
    fn apply_commands(&mut self) {
        for command in self.commands.drain() {
            match command {
                DisplayCommand::SetTfFrame(frame) => {
                    self.options.tf_frame = frame;
                    self.last_frame_pose = None;
                }
                DisplayCommand::SetMetersPerPixel(scale) => {
                    self.options.meters_per_pixel = scale;
                    for quad in &mut self.quads {
                        quad.mark_dirty();
                    }
                }
                DisplayCommand::SetQuadCount(count) => {
                    self.options
                        .quads
                        .resize_with(count, decalcast_core::QuadOptions::default);
                    self.frames.resize(count);
                    self.rebuild_all = true;
                }
                DisplayCommand::SetImageTopic { quad, topic } => {
                    if let Some(opts) = self.options.quads.get_mut(quad) {
                        opts.image_topic.clone_from(&topic);
                        if let Some(record) = self.quads.get_mut(quad) {
                            record.options_mut().image_topic = topic;
                        }
                        self.resubscribe(quad);
                    }
                }
                DisplayCommand::SetQuadPose { quad, pose } => {
                    if let Some(opts) = self.options.quads.get_mut(quad) {
                        opts.offset = pose;
                        if let Some(record) = self.quads.get_mut(quad) {
                            record.options_mut().offset = pose;
                            record.mark_dirty();
                        }
                    }
                }
                DisplayCommand::SetQuadSize { quad, width, height } => {
                    if let Some(opts) = self.options.quads.get_mut(quad) {
                        opts.width = width;
                        opts.height = height;
                        if let Some(record) = self.quads.get_mut(quad) {
                            record.options_mut().width = width;
                            record.options_mut().height = height;
                            record.mark_dirty();
                        }
                    }
                }
                DisplayCommand::SetBorder { quad, size, color } => {
                    if let Some(opts) = self.options.quads.get_mut(quad) {
                        opts.border_size = size;
                        opts.border_color = color;
                        if let Some(record) = self.quads.get_mut(quad) {
                            record.options_mut().border_size = size;
                            record.options_mut().border_color = color;
                            record.mark_dirty();
                        }
                    }
                }
                DisplayCommand::RebuildAll => self.rebuild_all = true,
            }
        }
    }

    /// Tears down the previous quad set and rebuilds from current options.
    ///
    /// Checks the enabled state before committing, so a disable arriving
    /// mid-rebuild discards the work silently.
    fn rebuild_quads<E: DecalEngine>(&mut self, engine: &mut E) {
        self.rebuild_all = false;
        if self.state != DisplayState::Enabled {
            return;
        }

        self.binder.release_all(engine);
        for quad in &mut self.quads {
            quad.detach(engine);
        }
        self.quads.clear();
        self.subscriptions.clear();

        let count = self.options.quad_count();
        if self.frames.len() != count {
            self.frames.resize(count);
        }
        self.statuses = vec![QuadStatus::default(); count];
        self.binder.resize(count);

        for (index, quad_options) in self.options.quads.clone().into_iter().enumerate() {
            let mut quad = Quad::new(index, quad_options);
            let frame = self.frames.latest(index);
            let valid = frame.as_deref().filter(|f| !f.is_empty());
            let size = quad.desired_size(valid, self.options.meters_per_pixel);
            quad.rebuild_mesh(size);
            quad.take_dirty();
            quad.attach(engine);
            self.binder.set_material(index, quad.material());
            self.quads.push(quad);
            self.subscriptions.push(None);
            self.resubscribe(index);
        }
        log::debug!("rebuilt {count} quads");
    }

    /// (Re)subscribes quad `index` to its configured topic.
    fn resubscribe(&mut self, index: usize) {
        let Some(slot) = self.subscriptions.get_mut(index) else {
            return;
        };
        *slot = None;

        let topic = self
            .options
            .quads
            .get(index)
            .map(|q| q.image_topic.clone())
            .unwrap_or_default();
        if topic.trim().is_empty() {
            // Configuration error: this quad stays dormant, the rest keep going.
            if let Some(status) = self.statuses.get_mut(index) {
                status.set("Topic", StatusLevel::Warn, "no image topic configured");
            }
            return;
        }

        let frames = Arc::clone(&self.frames);
        let callback: decalcast_core::FrameCallback = Arc::new(move |frame| {
            frames.store(index, frame);
        });
        match self.stream.subscribe(&topic, callback) {
            Ok(subscription) => {
                if let Some(status) = self.statuses.get_mut(index) {
                    status.set("Topic", StatusLevel::Ok, format!("subscribed to {topic}"));
                }
                *slot = Some(subscription);
            }
            Err(err) => {
                log::warn!("quad {index}: subscribe failed: {err}");
                if let Some(status) = self.statuses.get_mut(index) {
                    status.set("Topic", StatusLevel::Error, err.to_string());
                }
            }
        }
    }

    /// Common teardown for disable and reset: destruction order is decals,
    /// then nodes, then meshes, then the quad records.
    fn teardown<E: DecalEngine>(&mut self, engine: &mut E) {
        self.subscriptions.clear();
        self.binder.release_all(engine);
        for quad in &mut self.quads {
            quad.detach(engine);
        }
        self.quads.clear();
        self.statuses.clear();
        self.binder.resize(0);
        self.frames.clear();
        self.time_since_last_transform = 0.0;
        self.last_frame_pose = None;
        self.rebuild_all = false;
    }
}

impl RenderQueueListener for CameraQuadDisplay {
    fn pre_render_queue(&mut self, queue: RenderQueueId, materials: &mut dyn MaterialBindings) {
        if self.state == DisplayState::Enabled {
            self.binder.pre_render_queue(queue, materials);
        }
    }

    fn post_render_queue(&mut self, queue: RenderQueueId, materials: &mut dyn MaterialBindings) {
        self.binder.post_render_queue(queue, materials);
    }
}

impl RenderTargetListener for CameraQuadDisplay {
    /// Refreshes staged frames just before the target renders, so the decal
    /// samples the newest arrival even if it landed after `update`.
    fn pre_target_update(&mut self) {
        if self.state != DisplayState::Enabled {
            return;
        }
        for i in 0..self.quads.len() {
            if !self.binder.is_active(i) {
                continue;
            }
            if let Some(frame) = self.frames.latest(i) {
                if !frame.is_empty() {
                    let projection =
                        self.quads[i].projector().decal().texture_projection_matrix();
                    self.binder.stage(i, frame, projection);
                }
            }
        }
    }

    fn post_target_update(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use decalcast_core::{
        ImageBus, ImageFrame, PixelEncoding, QuadOptions, StaticTransformSource,
    };
    use decalcast_render::RecordingEngine;
    use glam::{Vec2, Vec3};

    struct Fixture {
        display: CameraQuadDisplay,
        engine: RecordingEngine,
        bus: ImageBus,
        transforms: Arc<StaticTransformSource>,
    }

    fn fixture(quads: Vec<QuadOptions>) -> Fixture {
        let bus = ImageBus::new();
        let transforms = Arc::new(StaticTransformSource::new(2.0));
        transforms.insert("base_link", Pose::IDENTITY);
        let options = DisplayOptions {
            quads,
            ..DisplayOptions::default()
        };
        let display = CameraQuadDisplay::new(
            options,
            Arc::new(bus.clone()),
            Arc::clone(&transforms) as Arc<dyn TransformSource>,
        );
        Fixture {
            display,
            engine: RecordingEngine::new(),
            bus,
            transforms,
        }
    }

    fn quad_options(topic: &str) -> QuadOptions {
        QuadOptions {
            image_topic: topic.to_string(),
            width: 1.0,
            height: 0.5,
            border_size: 0.05,
            ..QuadOptions::default()
        }
    }

    fn image(width: u32, height: u32, seq: u64) -> ImageFrame {
        ImageFrame::new(
            width,
            height,
            PixelEncoding::Mono8,
            vec![0u8; (width * height) as usize],
            seq,
        )
        .unwrap()
    }

    #[test]
    fn test_lifecycle_states() {
        let mut f = fixture(vec![quad_options("/cam/image")]);
        assert_eq!(f.display.state(), DisplayState::Uninitialized);

        f.display.on_initialize();
        assert_eq!(f.display.state(), DisplayState::Initialized);

        f.display.on_enable(&mut f.engine);
        assert_eq!(f.display.state(), DisplayState::Enabled);
        assert_eq!(f.display.quad_count(), 1);
        assert_eq!(f.bus.subscriber_count("/cam/image"), 1);

        f.display.on_disable(&mut f.engine);
        assert_eq!(f.display.state(), DisplayState::Disabled);
        assert_eq!(f.display.quad_count(), 0);
        assert_eq!(f.bus.subscriber_count("/cam/image"), 0);
        assert_eq!(f.engine.node_count(), 0);
        assert_eq!(f.engine.ordering_violations(), 0);
    }

    #[test]
    fn test_enable_before_initialize_ignored() {
        let mut f = fixture(vec![quad_options("/cam/image")]);
        f.display.on_enable(&mut f.engine);
        assert_eq!(f.display.state(), DisplayState::Uninitialized);
    }

    #[test]
    fn test_disable_enable_restores_geometry() {
        let mut f = fixture(vec![quad_options("/cam/image")]);
        f.display.on_initialize();
        f.display.on_enable(&mut f.engine);
        f.display.update(0.016, 0.016, &mut f.engine);
        let bbox_before = f.display.quad(0).unwrap().mesh().bounding_box().unwrap();

        f.display.on_disable(&mut f.engine);
        f.display.on_enable(&mut f.engine);
        f.display.update(0.016, 0.016, &mut f.engine);
        let bbox_after = f.display.quad(0).unwrap().mesh().bounding_box().unwrap();

        assert_eq!(f.display.quad_count(), 1);
        assert_eq!(bbox_before, bbox_after);
    }

    #[test]
    fn test_transform_failure_freezes_projector() {
        let mut f = fixture(vec![quad_options("/cam/image")]);
        f.display.on_initialize();
        f.display.on_enable(&mut f.engine);
        f.bus.publish("/cam/image", image(640, 480, 1));

        f.display.update(0.016, 0.016, &mut f.engine);
        assert!(f.display.is_decal_active(0));
        let origin_before = f.display.quad(0).unwrap().projector().decal().origin();

        // Lookup fails for the next tick: transform frozen, decal suppressed.
        f.transforms.remove("base_link");
        f.display.update(0.016, 0.016, &mut f.engine);
        let quad = f.display.quad(0).unwrap();
        assert!(quad.projector().is_stale());
        assert_eq!(quad.projector().decal().origin(), origin_before);
        assert!(!f.display.is_decal_active(0));
        assert_eq!(
            f.display.status(0).unwrap().level("Transform"),
            StatusLevel::Warn
        );

        // The frame comes back; retried automatically on the next tick.
        f.transforms.insert("base_link", Pose::IDENTITY);
        f.display.update(0.016, 0.016, &mut f.engine);
        assert!(!f.display.quad(0).unwrap().projector().is_stale());
        assert!(f.display.is_decal_active(0));
    }

    #[test]
    fn test_anchor_move_repositions_projector() {
        let mut f = fixture(vec![quad_options("/cam/image")]);
        f.display.on_initialize();
        f.display.on_enable(&mut f.engine);
        f.bus.publish("/cam/image", image(640, 480, 1));
        f.display.update(0.016, 0.016, &mut f.engine);

        f.transforms
            .insert("base_link", Pose::from_position(Vec3::new(0.0, 0.0, 1.0)));
        f.display.update(0.016, 0.016, &mut f.engine);
        let origin = f.display.quad(0).unwrap().projector().decal().origin();
        assert!((origin - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn test_commands_applied_on_tick_only() {
        let mut f = fixture(vec![quad_options("/cam/image")]);
        f.display.on_initialize();
        f.display.on_enable(&mut f.engine);
        f.display.update(0.016, 0.016, &mut f.engine);

        // UI context schedules; nothing changes until the next tick.
        f.display.update_mesh_properties(0, 2.0, 1.0, 0.0, Vec4::ONE);
        assert_eq!(
            f.display.quad(0).unwrap().resolved_size(),
            Vec2::new(1.0, 0.5)
        );

        f.display.update(0.016, 0.016, &mut f.engine);
        assert_eq!(
            f.display.quad(0).unwrap().resolved_size(),
            Vec2::new(2.0, 1.0)
        );
    }

    #[test]
    fn test_topic_change_resubscribes() {
        let mut f = fixture(vec![quad_options("/cam/image")]);
        f.display.on_initialize();
        f.display.on_enable(&mut f.engine);
        assert_eq!(f.bus.subscriber_count("/cam/image"), 1);

        f.display.update_display_images(0, "/cam/other");
        f.display.update(0.016, 0.016, &mut f.engine);
        assert_eq!(f.bus.subscriber_count("/cam/image"), 0);
        assert_eq!(f.bus.subscriber_count("/cam/other"), 1);
    }

    #[test]
    fn test_quad_count_resize_atomic() {
        let mut f = fixture(vec![quad_options("/cam/image")]);
        f.display.on_initialize();
        f.display.on_enable(&mut f.engine);
        f.display.update(0.016, 0.016, &mut f.engine);

        f.display.command_queue().push(DisplayCommand::SetQuadCount(3));
        f.display.update(0.016, 0.016, &mut f.engine);
        assert_eq!(f.display.quad_count(), 3);
        // Mesh node + projector node per quad.
        assert_eq!(f.engine.node_count(), 6);
        assert_eq!(f.engine.ordering_violations(), 0);
    }

    #[test]
    fn test_empty_topic_keeps_quad_dormant() {
        let mut f = fixture(vec![quad_options(""), quad_options("/cam/image")]);
        f.display.on_initialize();
        f.display.on_enable(&mut f.engine);
        f.bus.publish("/cam/image", image(640, 480, 1));
        f.display.update(0.016, 0.016, &mut f.engine);

        assert_eq!(
            f.display.status(0).unwrap().level("Topic"),
            StatusLevel::Warn
        );
        assert!(!f.display.is_decal_active(0));
        assert!(f.display.is_decal_active(1));
    }

    #[test]
    fn test_zero_sized_image_leaves_projector_uninitialized() {
        let mut f = fixture(vec![QuadOptions {
            image_topic: "/cam/image".to_string(),
            ..QuadOptions::default()
        }]);
        f.display.on_initialize();
        f.display.on_enable(&mut f.engine);
        f.bus.publish("/cam/image", image(0, 0, 1));
        f.display.update(0.016, 0.016, &mut f.engine);

        let quad = f.display.quad(0).unwrap();
        assert!(!quad.projector().is_initialized());
        assert!(!f.display.is_decal_active(0));
        assert_eq!(
            f.display.status(0).unwrap().level("Image"),
            StatusLevel::Warn
        );

        // A valid frame arriving later brings the quad up.
        f.bus.publish("/cam/image", image(640, 480, 2));
        f.display.update(0.016, 0.016, &mut f.engine);
        assert!(f.display.quad(0).unwrap().projector().is_initialized());
        assert!(f.display.is_decal_active(0));
    }

    #[test]
    fn test_reset_returns_to_initialized() {
        let mut f = fixture(vec![quad_options("/cam/image")]);
        f.display.on_initialize();
        f.display.on_enable(&mut f.engine);
        f.display.update(1.5, 1.5, &mut f.engine);

        f.display.reset(&mut f.engine);
        assert_eq!(f.display.state(), DisplayState::Initialized);
        assert_eq!(f.display.quad_count(), 0);
        assert_eq!(f.display.time_since_last_transform(), 0.0);
        assert_eq!(f.engine.node_count(), 0);
    }
}
