//! 测试用的内存浏览器
//!
//! 模拟 bbPress 列表页与主题页。每次导航都会使旧的元素句柄失效，
//! 与真实浏览器后退后的行为一致。

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use forum_scrape::error::BrowserError;
use forum_scrape::services::listing_url;
use forum_scrape::{Config, SessionDriver};

pub const BASE_URL: &str = "https://forum.test/topics/";

/// 测试配置：不等待、输出到指定路径
pub fn test_config(output: &Path, max_page: u32) -> Config {
    Config {
        base_url: BASE_URL.to_string(),
        max_page,
        output_file: output.display().to_string(),
        wait_timeout_secs: 1,
        settle_delay_ms: 0,
        ..Config::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickBehavior {
    /// 直接点击即可打开
    Direct,
    /// 直接点击被拒绝，脚本点击可以打开
    NeedsFallback,
    /// 两种点击都失败
    Unclickable,
}

#[derive(Debug, Clone)]
pub struct FakeTopic {
    pub title: String,
    pub replies: Vec<String>,
    pub click: ClickBehavior,
}

impl FakeTopic {
    pub fn new(title: &str, replies: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            replies: replies.iter().map(|r| r.to_string()).collect(),
            click: ClickBehavior::Direct,
        }
    }

    pub fn needs_fallback(mut self) -> Self {
        self.click = ClickBehavior::NeedsFallback;
        self
    }

    pub fn unclickable(mut self) -> Self {
        self.click = ClickBehavior::Unclickable;
        self
    }
}

#[derive(Debug, Clone)]
pub struct FakeListing {
    pub topics: Vec<FakeTopic>,
    pub container_present: bool,
}

impl FakeListing {
    pub fn new(topics: Vec<FakeTopic>) -> Self {
        Self {
            topics,
            container_present: true,
        }
    }

    /// 主题容器永远不会出现的列表页
    pub fn broken() -> Self {
        Self {
            topics: Vec::new(),
            container_present: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Blank,
    Listing(String),
    Topic { listing: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Navigate(String),
    Back,
    Click { title: String, programmatic: bool },
    /// 在非列表页上查询主题行
    RowQueryOffListing,
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum FakeElement {
    Row { index: usize, generation: u64 },
    Link { index: usize, generation: u64 },
    Reply(String),
}

pub struct FakeState {
    listings: HashMap<String, FakeListing>,
    location: Location,
    history: Vec<Location>,
    generation: u64,
    pub events: Vec<Event>,
    pub shutdown_calls: usize,
    pub fail_back: bool,
    /// 后退成功返回但页面不动
    pub stuck_back: bool,
}

impl FakeState {
    pub fn navigations(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Navigate(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }

    fn go_to(&mut self, location: Location) {
        let previous = std::mem::replace(&mut self.location, location);
        self.history.push(previous);
        self.generation += 1;
    }

    fn current_listing(&self) -> Option<(&String, &FakeListing)> {
        match &self.location {
            Location::Listing(url) => self.listings.get_key_value(url),
            _ => None,
        }
    }

    fn live_topic(&self, index: usize, generation: u64) -> Result<&FakeTopic, BrowserError> {
        if generation != self.generation {
            return Err(BrowserError::StaleElement {
                reason: format!("第 {} 个主题的句柄来自旧页面", index + 1),
            });
        }
        self.current_listing()
            .and_then(|(_, listing)| listing.topics.get(index))
            .ok_or_else(|| BrowserError::StaleElement {
                reason: "当前不在列表页".to_string(),
            })
    }
}

pub struct FakeDriver {
    state: Rc<RefCell<FakeState>>,
    config: Config,
}

impl FakeDriver {
    /// `pages[i]` 对应第 i+1 页
    pub fn new(config: &Config, pages: Vec<FakeListing>) -> Self {
        let listings = pages
            .into_iter()
            .enumerate()
            .map(|(i, listing)| (listing_url(&config.base_url, i as u32 + 1), listing))
            .collect();

        Self {
            state: Rc::new(RefCell::new(FakeState {
                listings,
                location: Location::Blank,
                history: Vec::new(),
                generation: 0,
                events: Vec::new(),
                shutdown_calls: 0,
                fail_back: false,
                stuck_back: false,
            })),
            config: config.clone(),
        }
    }

    /// 运行结束后用于检查状态
    pub fn handle(&self) -> Rc<RefCell<FakeState>> {
        Rc::clone(&self.state)
    }

    pub fn fail_back(self) -> Self {
        self.state.borrow_mut().fail_back = true;
        self
    }

    pub fn stuck_back(self) -> Self {
        self.state.borrow_mut().stuck_back = true;
        self
    }

    fn timeout(selector: &str, wait: Duration) -> BrowserError {
        BrowserError::WaitTimeout {
            selector: selector.to_string(),
            timeout_secs: wait.as_secs(),
        }
    }
}

impl SessionDriver for FakeDriver {
    type Element = FakeElement;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let mut state = self.state.borrow_mut();
        state.events.push(Event::Navigate(url.to_string()));
        if !state.listings.contains_key(url) {
            return Err(BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: "404".to_string(),
            });
        }
        state.go_to(Location::Listing(url.to_string()));
        Ok(())
    }

    async fn wait_for_presence(&self, selector: &str, wait: Duration) -> Result<(), BrowserError> {
        let state = self.state.borrow();
        let present = if selector == self.config.listing_container_selector {
            match &state.location {
                Location::Listing(url) => state
                    .listings
                    .get(url)
                    .map(|l| l.container_present)
                    .unwrap_or(false),
                // bbPress 主题页同样包含论坛容器
                Location::Topic { .. } => true,
                Location::Blank => false,
            }
        } else if selector == self.config.reply_content_selector {
            match &state.location {
                Location::Topic { listing, index } => state
                    .listings
                    .get(listing)
                    .and_then(|l| l.topics.get(*index))
                    .map(|t| !t.replies.is_empty())
                    .unwrap_or(false),
                _ => false,
            }
        } else {
            false
        };

        if present {
            Ok(())
        } else {
            Err(Self::timeout(selector, wait))
        }
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<FakeElement>, BrowserError> {
        let mut state = self.state.borrow_mut();
        if selector == self.config.topic_row_selector {
            let generation = state.generation;
            let rows = match state.current_listing() {
                Some((_, listing)) if listing.container_present => (0..listing.topics.len())
                    .map(|index| FakeElement::Row { index, generation })
                    .collect(),
                _ => Vec::new(),
            };
            if !matches!(state.location, Location::Listing(_)) {
                state.events.push(Event::RowQueryOffListing);
            }
            return Ok(rows);
        }

        if selector == self.config.reply_content_selector {
            if let Location::Topic { listing, index } = &state.location {
                let replies: Vec<FakeElement> = state
                    .listings
                    .get(listing)
                    .and_then(|l| l.topics.get(*index))
                    .map(|t| t.replies.iter().cloned().map(FakeElement::Reply).collect())
                    .unwrap_or_default();
                return Ok(replies);
            }
        }

        Ok(Vec::new())
    }

    async fn find_within(
        &self,
        parent: &FakeElement,
        selector: &str,
    ) -> Result<FakeElement, BrowserError> {
        let state = self.state.borrow();
        match parent {
            FakeElement::Row { index, generation } if selector == self.config.topic_link_selector => {
                state.live_topic(*index, *generation)?;
                Ok(FakeElement::Link {
                    index: *index,
                    generation: *generation,
                })
            }
            _ => Err(BrowserError::ElementNotFound {
                selector: selector.to_string(),
            }),
        }
    }

    async fn text_of(&self, element: &FakeElement) -> Result<String, BrowserError> {
        let state = self.state.borrow();
        match element {
            FakeElement::Link { index, generation } => {
                Ok(state.live_topic(*index, *generation)?.title.clone())
            }
            FakeElement::Reply(text) => Ok(text.clone()),
            FakeElement::Row { index, generation } => {
                Ok(state.live_topic(*index, *generation)?.title.clone())
            }
        }
    }

    async fn scroll_into_view(&self, element: &FakeElement) -> Result<(), BrowserError> {
        let state = self.state.borrow();
        if let FakeElement::Link { index, generation } = element {
            state.live_topic(*index, *generation)?;
        }
        Ok(())
    }

    async fn click(&self, element: &FakeElement) -> Result<(), BrowserError> {
        let mut state = self.state.borrow_mut();
        let FakeElement::Link { index, generation } = element else {
            return Err(BrowserError::NotInteractable {
                reason: "不是链接".to_string(),
            });
        };
        let topic = state.live_topic(*index, *generation)?.clone();
        if topic.click != ClickBehavior::Direct {
            return Err(BrowserError::NotInteractable {
                reason: "element click intercepted".to_string(),
            });
        }

        let listing = state.current_listing().map(|(url, _)| url.clone()).unwrap_or_default();
        state.events.push(Event::Click {
            title: topic.title,
            programmatic: false,
        });
        state.go_to(Location::Topic {
            listing,
            index: *index,
        });
        Ok(())
    }

    async fn programmatic_click(&self, element: &FakeElement) -> Result<(), BrowserError> {
        let mut state = self.state.borrow_mut();
        let FakeElement::Link { index, generation } = element else {
            return Err(BrowserError::ScriptFailed {
                reason: "不是链接".to_string(),
            });
        };
        let topic = state.live_topic(*index, *generation)?.clone();
        if topic.click == ClickBehavior::Unclickable {
            return Err(BrowserError::ScriptFailed {
                reason: "click() threw".to_string(),
            });
        }

        let listing = state.current_listing().map(|(url, _)| url.clone()).unwrap_or_default();
        state.events.push(Event::Click {
            title: topic.title,
            programmatic: true,
        });
        state.go_to(Location::Topic {
            listing,
            index: *index,
        });
        Ok(())
    }

    async fn navigate_back(&self, _timeout: Duration) -> Result<(), BrowserError> {
        let mut state = self.state.borrow_mut();
        state.events.push(Event::Back);
        if state.fail_back {
            return Err(BrowserError::NavigationFailed {
                url: "history.back()".to_string(),
                reason: "no history entry".to_string(),
            });
        }
        if state.stuck_back {
            return Ok(());
        }
        state.location = state.history.pop().unwrap_or(Location::Blank);
        state.generation += 1;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        let state = self.state.borrow();
        Ok(match &state.location {
            Location::Blank => "about:blank".to_string(),
            Location::Listing(url) => url.clone(),
            Location::Topic { listing, index } => format!("{}topic-{}/", listing, index),
        })
    }

    async fn shutdown(self) -> Result<(), BrowserError> {
        let mut state = self.state.borrow_mut();
        state.shutdown_calls += 1;
        state.events.push(Event::Shutdown);
        Ok(())
    }
}
