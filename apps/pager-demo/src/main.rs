//! Console walkthrough of a 2x3 paged grid: drags, a fling, a delayed
//! release, programmatic page jumps and an orientation switch, timed with a
//! real clock.
//!
//! Run with:
//! ```bash
//! RUST_LOG=debug cargo run --package pager-demo
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use pagegrid_foundation::{
    IntRect, Orientation, PagerGridConfig, PagerGridError, PagerGridHost, PagerGridLayoutManager,
    ViewHandle, Viewport,
};
use web_time::Instant;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Host that keeps placements in memory and prints a summary on demand.
struct ConsoleHost {
    item_count: usize,
    viewport: Viewport,
    next_handle: u64,
    live: BTreeMap<u64, (usize, IntRect)>,
    frame_pending: bool,
}

impl ConsoleHost {
    fn new(item_count: usize, viewport: Viewport) -> Self {
        Self {
            item_count,
            viewport,
            next_handle: 0,
            live: BTreeMap::new(),
            frame_pending: false,
        }
    }

    fn print_visible(&self) {
        let mut visible: Vec<(usize, IntRect)> = self
            .live
            .values()
            .filter(|(_, frame)| {
                frame.right > 0
                    && frame.bottom > 0
                    && frame.left < self.viewport.width
                    && frame.top < self.viewport.height
            })
            .copied()
            .collect();
        visible.sort_by_key(|(index, _)| *index);
        let indices: Vec<usize> = visible.iter().map(|(index, _)| *index).collect();
        println!(
            "  {} live views, visible items {:?}",
            self.live.len(),
            indices
        );
    }
}

impl PagerGridHost for ConsoleHost {
    fn item_count(&self) -> usize {
        self.item_count
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn materialize_view(&mut self, index: usize) -> ViewHandle {
        self.next_handle += 1;
        self.live
            .insert(self.next_handle, (index, IntRect::default()));
        ViewHandle(self.next_handle)
    }

    fn layout_view(&mut self, handle: ViewHandle, frame: IntRect) {
        if let Some(entry) = self.live.get_mut(&handle.id()) {
            entry.1 = frame;
        }
    }

    fn release_view(&mut self, handle: ViewHandle) {
        self.live.remove(&handle.id());
    }

    fn schedule_animation_frame(&mut self) {
        self.frame_pending = true;
    }

    fn cancel_animation_frame(&mut self) {
        self.frame_pending = false;
    }
}

struct Session {
    manager: PagerGridLayoutManager,
    host: ConsoleHost,
    clock: Instant,
}

impl Session {
    fn now_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    fn pump_frames(&mut self) -> usize {
        let mut frames = 0;
        while self.host.frame_pending {
            self.host.frame_pending = false;
            std::thread::sleep(FRAME_INTERVAL);
            let frame_time_nanos = self.clock.elapsed().as_nanos() as u64;
            self.manager
                .on_animation_frame(&mut self.host, frame_time_nanos);
            frames += 1;
        }
        frames
    }

    fn wait_for_release(&mut self) {
        while self.manager.pending_release().is_some() {
            std::thread::sleep(FRAME_INTERVAL);
            let now = self.now_ms();
            if let Some(decision) = self.manager.poll_release(&mut self.host, now) {
                log::info!("committed {:?} after {}ms", decision, now);
            }
        }
    }

    fn drag(&mut self, deltas: &[i32]) {
        self.manager.begin_drag(&mut self.host);
        for delta in deltas {
            self.manager.drag_by(&mut self.host, *delta);
            std::thread::sleep(FRAME_INTERVAL);
        }
    }

    fn report(&self, step: &str) {
        println!(
            "{}: offset {:?}, page {}/{}",
            step,
            self.manager.offset_xy(),
            self.manager.current_page_index(),
            self.manager.total_page_count()
        );
        self.host.print_visible();
    }
}

fn main() -> Result<(), PagerGridError> {
    #[cfg(feature = "logging")]
    env_logger::init();

    let config = PagerGridConfig::grid(2, 3, Orientation::Horizontal);
    let mut manager = PagerGridLayoutManager::new(config)?;
    manager.add_page_count_listener(|count| println!("  -> page count {}", count));
    manager.add_page_selected_listener(|page| println!("  -> page {} selected", page));

    let mut session = Session {
        manager,
        host: ConsoleHost::new(40, Viewport::new(600, 400)),
        clock: Instant::now(),
    };
    session.manager.attach();
    session.manager.layout(&mut session.host);
    session.report("initial layout");

    session.drag(&[40, 40, 40]);
    let now = session.now_ms();
    session
        .manager
        .end_drag(&mut session.host, 2400, now);
    let frames = session.pump_frames();
    session.report(&format!("fling settled after {} frames", frames));

    session.drag(&[120, 100]);
    let now = session.now_ms();
    let decision = session.manager.end_drag(&mut session.host, 0, now);
    println!("slow release decided {:?}", decision);
    session.wait_for_release();
    session.pump_frames();
    session.report("slow release settled");

    session.manager.smooth_go_to_page(&mut session.host, 6)?;
    let frames = session.pump_frames();
    session.report(&format!("smooth scroll to last page took {} frames", frames));

    if let Err(err) = session.manager.next_page(&mut session.host) {
        println!("next page rejected: {}", err);
    }

    session.manager.go_to_page(&mut session.host, 2)?;
    session
        .manager
        .set_orientation(&mut session.host, Orientation::Vertical)?;
    session.report("switched to vertical");

    session.manager.detach(&mut session.host);
    println!("detached, {} live views left", session.host.live.len());
    Ok(())
}
