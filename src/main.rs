fn main() {
    genre_demo_lib::run()
}
