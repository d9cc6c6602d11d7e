use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll, Wake, Waker},
};

use crossbeam::channel::{Receiver, Sender, unbounded};

type LocalTask<E> = Pin<Box<dyn Future<Output = Result<(), E>>>>;

/// A single-threaded executor that joins a batch of local futures.
///
/// Futures are polled on the calling thread. Each spawned future is polled once immediately, so
/// everything up to its first suspension point runs in spawn order. [`Executor::join`] then
/// drives the remaining futures until all have settled, blocking on a channel while none are
/// ready. Wakers only send the task index over that channel, so a future may be woken from any
/// thread.
///
/// The first error settles the join; futures still pending at that point are dropped.
pub struct Executor<E> {
    tasks: Vec<Option<Slot<E>>>,
    remaining: usize,
    sender: Sender<usize>,
    receiver: Receiver<usize>,
}

struct Slot<E> {
    future: LocalTask<E>,
    waker: Waker,
}

struct TaskWaker {
    index: usize,
    sender: Sender<usize>,
}

impl Wake for TaskWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        // The receiver only goes away with the executor, after which wakes are moot.
        let _ = self.sender.send(self.index);
    }
}

impl<E> Default for Executor<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Executor<E> {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            tasks: Vec::new(),
            remaining: 0,
            sender,
            receiver,
        }
    }

    /// Start a future: poll it once and keep it if it is still pending.
    pub fn spawn(&mut self, future: LocalTask<E>) -> Result<(), E> {
        let index = self.tasks.len();
        let waker = Waker::from(Arc::new(TaskWaker {
            index,
            sender: self.sender.clone(),
        }));
        self.tasks.push(Some(Slot { future, waker }));
        self.remaining += 1;
        self.poll(index)
    }

    /// Number of spawned futures that have not settled yet.
    #[inline]
    pub fn pending(&self) -> usize {
        self.remaining
    }

    /// Drive every pending future to completion.
    pub fn join(mut self) -> Result<(), E> {
        while self.remaining > 0 {
            let Ok(index) = self.receiver.recv() else {
                break;
            };
            self.poll(index)?;
        }
        Ok(())
    }

    fn poll(&mut self, index: usize) -> Result<(), E> {
        // Spurious or late wakes for settled tasks are ignored.
        let Some(slot) = self.tasks.get_mut(index).and_then(Option::as_mut) else {
            return Ok(());
        };

        let mut cx = Context::from_waker(&slot.waker);
        let poll = slot.future.as_mut().poll(&mut cx);
        match poll {
            Poll::Pending => Ok(()),
            Poll::Ready(result) => {
                self.tasks[index] = None;
                self.remaining -= 1;
                result
            }
        }
    }
}

/// A future that yields to the executor once before completing.
pub fn yield_now() -> YieldNow {
    YieldNow { yielded: false }
}

#[must_use = "futures do nothing unless awaited"]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
