use std::io;
use std::sync::mpsc;
use std::thread;

use unsegen::input::Input;

use crate::board::{Change, Observer};
use crate::config::Config;

pub enum Event {
    Input(Input),
    Update,
    Redraw,
}

pub struct Dispatcher {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
    _input_handle: thread::JoinHandle<()>,
    _update_handle: thread::JoinHandle<()>,
}

impl Dispatcher {
    pub fn from_config(config: &Config) -> Dispatcher {
        let tick_rate = config.tick_rate();
        let (tx, rx) = mpsc::channel();
        let input_handle = {
            let tx = tx.clone();
            thread::spawn(move || {
                let stdin = io::stdin();
                let stdin = stdin.lock();
                for evt in Input::read_all(stdin) {
                    match evt {
                        Ok(key) => {
                            if tx.send(Event::Input(key)).is_err() {
                                return;
                            }
                        }
                        Err(e) => log::warn!("Error while reading input: {}", e),
                    }
                }
            })
        };
        let update_handle = {
            let tx = tx.clone();
            thread::spawn(move || loop {
                if tx.send(Event::Update).is_err() {
                    return;
                }
                thread::sleep(tick_rate);
            })
        };
        Dispatcher {
            rx,
            tx,
            _input_handle: input_handle,
            _update_handle: update_handle,
        }
    }

    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.rx.recv()
    }

    pub fn redraw_notifier(&self) -> RedrawNotifier {
        RedrawNotifier(self.tx.clone())
    }
}

/// Turns board changes into redraw requests on the dispatcher's channel.
pub struct RedrawNotifier(mpsc::Sender<Event>);

impl Observer for RedrawNotifier {
    fn notify(&self, change: &Change) {
        log::trace!("{:?}", change);
        if self.0.send(Event::Redraw).is_err() {
            log::warn!("Dispatcher is gone, dropping redraw request");
        }
    }
}
