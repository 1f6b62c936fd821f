fn main() {
    dioxus::launch(vhub_web::App);
}
