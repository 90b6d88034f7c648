sort_impl!("rust_lomuto_sequential_unstable");

#[inline]
pub fn sort(data: &mut [i32]) {
    lomuto_quicksort::sort(data);
}
