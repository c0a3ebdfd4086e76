/// Produce the one-line label shown for a value in a rendered tree.
pub trait Render {
    fn render(&self) -> String;
}

impl<T> Render for &T
where
    T: Render + ?Sized,
{
    fn render(&self) -> String {
        (**self).render()
    }
}

impl Render for str {
    fn render(&self) -> String {
        self.to_owned()
    }
}

impl Render for String {
    fn render(&self) -> String {
        self.clone()
    }
}

macro_rules! render_display {
    ($($ty:ty),*) => {
        $(
            impl Render for $ty {
                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

render_display!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, bool, char);
