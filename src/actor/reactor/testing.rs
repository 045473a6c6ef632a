//! In-memory window-manager state backing the test suites.
//!
//! [`TestWm`] is the in-memory implementation of the capability traits the
//! coordinators are generic over; [`FakeWindowServer`] answers window-server
//! queries from canned data.

use crate::common::collections::{HashMap, HashSet};
use crate::engine::focus::{CycleDirection, FocusTarget};
use crate::engine::transition::TransitionTarget;
use crate::sys::app::{Window, WindowFlags, WindowId};
use crate::sys::geometry::Rect;
use crate::sys::screen::{ScreenId, ScreenInfo, Space};
use crate::sys::window_server::{WindowServer, WindowServerId, WindowServerInfo};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TestWindow {
    pub id: WindowId,
    pub frame: Rect,
    pub title: Option<String>,
    pub flags: WindowFlags,
}

impl TestWindow {
    pub fn new(pid: i32, idx: u32, frame: Rect) -> TestWindow {
        TestWindow {
            id: WindowId::new(pid, idx),
            frame,
            title: None,
            flags: WindowFlags::all(),
        }
    }

}

impl Window for TestWindow {
    fn id(&self) -> WindowId { self.id }

    fn frame(&self) -> Rect { self.frame }

    fn title(&self) -> Option<String> { self.title.clone() }

    fn flags(&self) -> WindowFlags { self.flags }
}

/// A window-server record matching `window`, stacked with `id`.
pub(crate) fn ws_record(id: u32, window: &TestWindow, owner: Option<&str>) -> WindowServerInfo {
    WindowServerInfo {
        id: WindowServerId::new(id),
        pid: window.id.pid,
        frame: window.frame,
        title: window.title.clone(),
        owner: owner.map(str::to_owned),
        layer: 0,
    }
}

#[derive(Default)]
pub(crate) struct FakeWindowServer {
    pub records: Option<Vec<WindowServerInfo>>,
    pub above: HashMap<WindowServerId, usize>,
}

impl WindowServer for FakeWindowServer {
    fn window_list(
        &self,
        _only_on_screen: bool,
        relative_to: Option<WindowServerId>,
    ) -> Option<Vec<WindowServerInfo>> {
        assert!(relative_to.is_none(), "tests answer windows_above directly");
        self.records.clone()
    }

    fn windows_above(&self, id: WindowServerId) -> Option<usize> {
        self.above.get(&id).copied()
    }
}

/// In-memory window-manager state: screens, per-screen window ordering (the
/// activity cache), focus bookkeeping, floating set and space arrangement.
pub(crate) struct TestWm {
    screens: Vec<ScreenInfo>,
    windows: Vec<Vec<TestWindow>>,
    floating: HashSet<WindowId>,
    focused: Option<WindowId>,
    focused_screen: Option<usize>,
    last_focused: HashMap<ScreenId, WindowId>,
    hints: HashMap<(WindowId, CycleDirection), WindowId>,
    spaces: HashMap<ScreenId, (Vec<Space>, Space)>,
}

impl TestWm {
    pub fn new(screen_frames: Vec<Rect>) -> TestWm {
        let screens: Vec<ScreenInfo> =
            screen_frames.into_iter().map(|frame| ScreenInfo::new(frame, frame)).collect();
        let windows = screens.iter().map(|_| Vec::new()).collect();
        TestWm {
            screens,
            windows,
            floating: HashSet::default(),
            focused: None,
            focused_screen: None,
            last_focused: HashMap::default(),
            hints: HashMap::default(),
            spaces: HashMap::default(),
        }
    }

    pub fn add_window(&mut self, screen_index: usize, window: TestWindow) {
        self.windows[screen_index].push(window);
    }

    pub fn focus(&mut self, window: WindowId) {
        self.focused = Some(window);
        if let Some(index) = self.screen_index_of(window) {
            self.focused_screen = Some(index);
        }
    }

    pub fn focus_screen_index(&mut self, index: usize) {
        self.focused_screen = Some(index);
    }

    pub fn remember_focus(&mut self, screen_index: usize, window: WindowId) {
        self.last_focused.insert(self.screens[screen_index].id, window);
    }

    pub fn float(&mut self, window: WindowId) {
        self.floating.insert(window);
    }

    pub fn hint(&mut self, from: WindowId, direction: CycleDirection, to: WindowId) {
        self.hints.insert((from, direction), to);
    }

    pub fn set_spaces(&mut self, screen_index: usize, spaces: Vec<Space>, current: Space) {
        self.spaces.insert(self.screens[screen_index].id, (spaces, current));
    }

    /// Looks up a window by id; panics when it is not part of the fixture.
    #[track_caller]
    pub fn window(&self, id: WindowId) -> TestWindow {
        self.find_window(id).expect("window not in fixture")
    }

    fn find_window(&self, id: WindowId) -> Option<TestWindow> {
        self.windows.iter().flatten().find(|w| w.id == id).cloned()
    }

    fn screen_index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|list| list.iter().any(|w| w.id == id))
    }
}

impl FocusTarget for TestWm {
    type W = TestWindow;
    type S = ScreenInfo;

    fn focused_window(&self) -> Option<TestWindow> {
        self.focused.and_then(|id| self.find_window(id))
    }

    fn focused_screen(&self) -> Option<ScreenInfo> {
        self.focused_screen.map(|index| self.screens[index].clone())
    }

    fn screens(&self) -> Vec<ScreenInfo> { self.screens.clone() }

    fn screen_of(&self, window: &TestWindow) -> Option<ScreenInfo> {
        self.screen_index_of(window.id).map(|index| self.screens[index].clone())
    }

    fn windows_on(&self, screen: &ScreenInfo) -> Vec<TestWindow> {
        self.screens
            .iter()
            .position(|s| s.id == screen.id)
            .map(|index| self.windows[index].clone())
            .unwrap_or_default()
    }

    fn adjacent_window(&self, from: &TestWindow, direction: CycleDirection) -> Option<TestWindow> {
        self.hints.get(&(from.id, direction)).and_then(|&id| self.find_window(id))
    }

    fn last_focused_on(&self, screen: &ScreenInfo) -> Option<TestWindow> {
        self.last_focused.get(&screen.id).and_then(|&id| self.find_window(id))
    }
}

impl TransitionTarget for TestWm {
    fn active_windows_on(&self, screen: &ScreenInfo) -> Vec<TestWindow> {
        self.windows_on(screen)
            .into_iter()
            .filter(|w| !self.floating.contains(&w.id))
            .collect()
    }

    fn is_floating(&self, window: &TestWindow) -> bool { self.floating.contains(&window.id) }

    fn spaces_on(&self, screen: &ScreenInfo) -> Option<Vec<Space>> {
        self.spaces.get(&screen.id).map(|(spaces, _)| spaces.clone())
    }

    fn current_space(&self, screen: &ScreenInfo) -> Option<Space> {
        self.spaces.get(&screen.id).map(|(_, current)| current.clone())
    }
}
